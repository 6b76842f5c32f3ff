//! ASCOM Alpaca リクエストデコーダー
//!
//! 有界バッファでインクリメンタルに動作する HTTP/1.1 リクエスト
//! デコーダー。呼び出し側がトランスポートから埋めたバッファの
//! 先頭部分を消費し、記述子の完成・確定的な HTTP エラー・追加入力の
//! 要求のいずれかを返す。ヒープ割り当ては行わず、渡されたバイトの
//! 先より先を読むこともない。
//!
//! ## 使い方
//!
//! ```rust
//! use alpaca_http11::{ByteView, DecodeStatus, DeviceType, RequestDecoder};
//!
//! let mut decoder = RequestDecoder::new();
//! decoder.reset();
//!
//! // 実際にはソケットから読み取ったバッファを渡す
//! let input = b"GET /api/v1/safetymonitor/0/issafe HTTP/1.1\r\n\r\n";
//! let mut view = ByteView::new(input);
//! let status = decoder.decode(&mut view, false, true);
//!
//! assert_eq!(status, DecodeStatus::HttpOk);
//! assert_eq!(decoder.request().device_type, DeviceType::SafetyMonitor);
//! ```

mod head;
mod param;
mod path;
mod phase;

use crate::constants::{HttpHeader, Parameter};
use crate::listener::RequestDecoderListener;
use crate::request::AlpacaRequest;
use crate::status::{DecodeStatus, RequestDecoderStatus};
use crate::view::ByteView;

use phase::DecodeFn;

/// PUT ボディ長の上限 (バイト数)
///
/// 窓サイズの上限と同じ値。これを超える Content-Length の PUT は
/// 413 で拒否される。
pub const MAX_PAYLOAD_SIZE: usize = ByteView::MAX_SIZE;

/// パス・パラメータ名・ヘッダー名を構成する文字
pub(crate) fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_'
}

/// ASCOM Alpaca リクエストの Sans I/O デコーダー
///
/// 1 インスタンスが進行中の 1 リクエスト専用。各リクエストの最初の
/// `decode()` の前に必ず `reset()` を呼ぶこと。終端ステータスを返した
/// 後は、`reset()` されるまで `decode()` は 500 を返す。
pub struct RequestDecoder<'a> {
    decoder_status: RequestDecoderStatus,
    /// 次に適用するデコード関数 (`None` は reset 待ち)
    pub(crate) decode_fn: Option<DecodeFn>,
    /// パラメータ値のデコード中に有効
    pub(crate) current_parameter: Parameter,
    /// ヘッダー値のデコード中に有効
    pub(crate) current_header: HttpHeader,
    /// ボディの未消費バイト数 (PUT のみ)
    pub(crate) remaining_content_length: usize,
    pub(crate) is_decoding_header: bool,
    pub(crate) is_decoding_start_line: bool,
    pub(crate) is_final_input: bool,
    pub(crate) found_content_length: bool,
    pub(crate) request: AlpacaRequest,
    pub(crate) listener: Option<&'a mut dyn RequestDecoderListener>,
}

impl<'a> RequestDecoder<'a> {
    /// リスナーなしのデコーダーを作成
    ///
    /// 生成直後はデコードできない。最初に `reset()` を呼ぶこと。
    pub fn new() -> Self {
        Self {
            decoder_status: RequestDecoderStatus::Reset,
            decode_fn: None,
            current_parameter: Parameter::Unknown,
            current_header: HttpHeader::Unknown,
            remaining_content_length: 0,
            is_decoding_header: true,
            is_decoding_start_line: true,
            is_final_input: false,
            found_content_length: false,
            request: AlpacaRequest::new(),
            listener: None,
        }
    }

    /// リスナー付きのデコーダーを作成
    ///
    /// リスナーはデコーダーの生存期間の間借用される。
    pub fn with_listener(listener: &'a mut dyn RequestDecoderListener) -> Self {
        Self {
            listener: Some(listener),
            ..Self::new()
        }
    }

    /// 新しいリクエストのデコードを準備する
    pub fn reset(&mut self) {
        self.decode_fn = Some(DecodeFn::HttpMethod);
        self.request.reset();
        self.current_parameter = Parameter::Unknown;
        self.current_header = HttpHeader::Unknown;
        self.remaining_content_length = 0;
        self.is_decoding_header = true;
        self.is_decoding_start_line = true;
        self.is_final_input = false;
        self.found_content_length = false;
        self.decoder_status = RequestDecoderStatus::Reset;
    }

    /// デコーダーのライフサイクル状態を取得
    pub fn status(&self) -> RequestDecoderStatus {
        self.decoder_status
    }

    /// リクエスト記述子を取得
    pub fn request(&self) -> &AlpacaRequest {
        &self.request
    }

    /// バッファの先頭部分をデコードする
    ///
    /// 現在のデコード関数を、入力が尽きるか終端ステータスに達するまで
    /// 繰り返し適用する。返るとき `buffer` は消費済みバイトの分だけ
    /// 先頭から進んでいる。
    ///
    /// - `buffer_is_full`: バッファに追加入力の余地がないことを示す。
    ///   1 バイトも消費できないまま `NeedMoreInput` になった場合、431
    ///   に昇格する (最小のデコードステップが窓に収まらない)。
    /// - `at_end_of_input`: これ以降の入力がないことを示す。ボディの
    ///   途中で入力が尽きた場合は 400 になる。
    pub fn decode(
        &mut self,
        buffer: &mut ByteView<'_>,
        buffer_is_full: bool,
        at_end_of_input: bool,
    ) -> DecodeStatus {
        if self.decode_fn.is_none() {
            // reset() が先に必要。組み込みでは静的に確保したデコーダーを
            // 複数リクエストに使い回すため、生成時に自動で reset しない。
            return DecodeStatus::HttpInternalServerError;
        }
        if self.decoder_status == RequestDecoderStatus::Reset {
            self.decoder_status = RequestDecoderStatus::Decoding;
        }

        let start_size = buffer.len();
        let mut status = if self.is_decoding_header {
            self.decode_message_header(buffer, at_end_of_input)
        } else {
            self.decode_message_body(buffer, at_end_of_input)
        };

        if buffer_is_full && status == DecodeStatus::NeedMoreInput && start_size == buffer.len() {
            // 満杯のバッファを 1 バイトも消費できなかった。
            status = DecodeStatus::HttpRequestHeaderFieldsTooLarge;
        }
        if status >= DecodeStatus::HttpOk {
            self.decode_fn = None;
            self.decoder_status = RequestDecoderStatus::Decoded;
        }
        status
    }

    /// スタートラインとヘッダー行をデコードする
    ///
    /// ヘッダーの長さは事前に分からないため、終端の検出は
    /// `DecodeFn::HeaderLines` に任せる。
    fn decode_message_header(
        &mut self,
        buffer: &mut ByteView<'_>,
        at_end_of_input: bool,
    ) -> DecodeStatus {
        let mut status;
        loop {
            let Some(func) = self.decode_fn else {
                return DecodeStatus::HttpInternalServerError;
            };
            status = func.call(self, buffer);
            if status != DecodeStatus::ContinueDecoding {
                break;
            }
        }

        if status == DecodeStatus::NeedMoreInput && !self.is_decoding_header {
            // ヘッダーが終わり、ボディ付きのリクエストだと判明した。
            return self.decode_message_body(buffer, at_end_of_input);
        }
        status
    }

    /// Content-Length が判明している PUT ボディをデコードする
    fn decode_message_body(
        &mut self,
        buffer: &mut ByteView<'_>,
        mut at_end_of_input: bool,
    ) -> DecodeStatus {
        if buffer.len() > self.remaining_content_length {
            // パイプラインされたリクエストは想定しない。
            return DecodeStatus::HttpPayloadTooLarge;
        } else if buffer.len() == self.remaining_content_length {
            // バッファの終端をボディの終端として扱ってよい。
            at_end_of_input = true;
            self.is_final_input = true;
        } else if at_end_of_input || self.is_final_input {
            // Content-Length に届く前に入力が尽きた。
            return DecodeStatus::HttpBadRequest;
        }

        let mut status;
        loop {
            let before = buffer.len();
            let Some(func) = self.decode_fn else {
                return DecodeStatus::HttpInternalServerError;
            };
            status = func.call(self, buffer);
            self.remaining_content_length -= before - buffer.len();
            if status != DecodeStatus::ContinueDecoding {
                break;
            }
        }

        if status >= DecodeStatus::HttpOk {
            return status;
        }
        if at_end_of_input {
            return DecodeStatus::HttpBadRequest;
        }
        status
    }

    /// 次のデコード関数を設定する
    pub(crate) fn set_decode_fn(&mut self, func: DecodeFn) -> DecodeStatus {
        self.decode_fn = Some(func);
        DecodeStatus::ContinueDecoding
    }

    /// リスナー呼び出し後のステータスを畳み込みつつ次の関数を設定する
    ///
    /// `ContinueDecoding` なら続行。100 未満のそれ以外の値 (つまり
    /// `NeedMoreInput`) はリスナーの誤用なので 500。100 以上は採用して
    /// 終了する。
    pub(crate) fn set_decode_fn_after_listener_call(
        &mut self,
        func: DecodeFn,
        status: DecodeStatus,
    ) -> DecodeStatus {
        match status {
            DecodeStatus::ContinueDecoding => self.set_decode_fn(func),
            s if s < DecodeStatus::HttpOk => DecodeStatus::HttpInternalServerError,
            s => s,
        }
    }
}

impl Default for RequestDecoder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for RequestDecoder<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RequestDecoder")
            .field("decoder_status", &self.decoder_status)
            .field("decode_fn", &self.decode_fn)
            .field("remaining_content_length", &self.remaining_content_length)
            .field("is_decoding_header", &self.is_decoding_header)
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_before_reset_is_an_error() {
        let mut decoder = RequestDecoder::new();
        let input = b"GET /setup HTTP/1.1\r\n\r\n";
        let mut view = ByteView::new(input);
        assert_eq!(
            decoder.decode(&mut view, false, true),
            DecodeStatus::HttpInternalServerError
        );
        // 入力は消費されない
        assert_eq!(view.len(), input.len());
    }

    #[test]
    fn decode_after_terminal_status_is_an_error() {
        let mut decoder = RequestDecoder::new();
        decoder.reset();
        let mut view = ByteView::new(b"GET /setup HTTP/1.1\r\n\r\n");
        assert_eq!(decoder.decode(&mut view, false, true), DecodeStatus::HttpOk);
        assert_eq!(decoder.status(), RequestDecoderStatus::Decoded);

        let mut view = ByteView::new(b"GET /setup HTTP/1.1\r\n\r\n");
        assert_eq!(
            decoder.decode(&mut view, false, true),
            DecodeStatus::HttpInternalServerError
        );
    }

    #[test]
    fn status_transitions() {
        let mut decoder = RequestDecoder::new();
        assert_eq!(decoder.status(), RequestDecoderStatus::Reset);
        decoder.reset();
        assert_eq!(decoder.status(), RequestDecoderStatus::Reset);

        let mut view = ByteView::new(b"GET ");
        assert_eq!(
            decoder.decode(&mut view, false, false),
            DecodeStatus::NeedMoreInput
        );
        assert_eq!(decoder.status(), RequestDecoderStatus::Decoding);
    }
}
