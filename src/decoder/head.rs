//! ヘッダー行のデコード関数
//!
//! `HTTP/1.1\r\n` の照合からヘッダー終端の処理までを担当する。
//! ヘッダー値は「値全体 + 終端文字」が窓に収まっている必要がある。
//! 先頭の OWS は見えている分を都度捨てるので窓の容量を消費しないが、
//! 末尾の OWS は値と一緒に窓に収まらなければならない。

use crate::constants::{HttpHeader, HttpMethod};
use crate::match_literals::match_http_header;
use crate::status::DecodeStatus;
use crate::view::ByteView;

use super::phase::DecodeFn;
use super::{is_name_char, RequestDecoder, MAX_PAYLOAD_SIZE};

const END_OF_HEADER_LINE: &[u8] = b"\r\n";
const HTTP_VERSION_END_OF_LINE: &[u8] = b"HTTP/1.1\r\n";

/// OWS (optional whitespace): 空白または水平タブ (RFC 7230)
fn is_optional_whitespace(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

/// ヘッダー値を構成できる文字 (RFC 7230 Section 3.2)
fn is_field_content(c: u8) -> bool {
    (0x20..0x7f).contains(&c) || c == b'\t'
}

/// 先頭の OWS を取り除く
///
/// 窓内がすべて OWS (または空) なら全部捨てて false を返す。次の文字が
/// OWS かどうかまだ分からないため、その場合は確定できない。
fn skip_leading_optional_whitespace(view: &mut ByteView<'_>) -> bool {
    match view.find_first_not_of(is_optional_whitespace) {
        None => {
            view.remove_prefix(view.len());
            false
        }
        Some(beyond) => {
            view.remove_prefix(beyond);
            true
        }
    }
}

fn trim_trailing_optional_whitespace(view: &mut ByteView<'_>) {
    while matches!(view.back(), Some(c) if is_optional_whitespace(c)) {
        view.remove_suffix(1);
    }
}

/// スタートラインは `HTTP/1.1\r\n` で終わらなければならない
/// (HTTP/1.0 以前はサポートしない)
pub(super) fn match_http_version(
    state: &mut RequestDecoder<'_>,
    view: &mut ByteView<'_>,
) -> DecodeStatus {
    if view.starts_with(HTTP_VERSION_END_OF_LINE) {
        view.remove_prefix(HTTP_VERSION_END_OF_LINE.len());
        state.is_decoding_start_line = false;
        state.set_decode_fn(DecodeFn::HeaderLines)
    } else if view.len() < HTTP_VERSION_END_OF_LINE.len() {
        DecodeStatus::NeedMoreInput
    } else {
        DecodeStatus::HttpVersionNotSupported
    }
}

/// ヘッダー行の先頭。ヘッダー終端の `\r\n` かヘッダー名かを判定する
pub(super) fn decode_header_lines(
    state: &mut RequestDecoder<'_>,
    view: &mut ByteView<'_>,
) -> DecodeStatus {
    if view.match_and_consume(END_OF_HEADER_LINE) {
        // ヘッダー終端に到達した。
        if state.request.http_method.is_read() {
            // GET / HEAD のボディは読まない。
            return DecodeStatus::HttpOk;
        }
        if state.request.http_method != HttpMethod::Put {
            // DecodeFn::HttpMethod が対応しないメソッドを通した場合のみ
            // ここに来る。
            return DecodeStatus::HttpInternalServerError;
        }
        if !state.found_content_length {
            // 長さが分からなければボディをデコードできない。
            return DecodeStatus::HttpLengthRequired;
        }
        if state.remaining_content_length == 0 {
            // すべてのパラメータがクエリ側にあった場合。例えば
            // observingconditions の refresh はパラメータ不要。
            return DecodeStatus::HttpOk;
        }
        state.is_decoding_header = false;
        state.decode_fn = Some(DecodeFn::ParamName);
        DecodeStatus::NeedMoreInput
    } else if END_OF_HEADER_LINE.starts_with(view.as_slice()) {
        // 空、または `\r` 1 文字。どちらか判定するには次の入力が要る。
        DecodeStatus::NeedMoreInput
    } else {
        state.set_decode_fn(DecodeFn::HeaderName)
    }
}

/// ヘッダー名をデコードする
pub(super) fn decode_header_name(
    state: &mut RequestDecoder<'_>,
    view: &mut ByteView<'_>,
) -> DecodeStatus {
    let Some(token) = view.split_matching_prefix(is_name_char) else {
        return DecodeStatus::NeedMoreInput;
    };
    if !view.match_and_consume(b":") {
        return DecodeStatus::HttpBadRequest;
    }
    state.current_header = HttpHeader::Unknown;
    match match_http_header(token.as_slice()) {
        Some(header) => {
            state.current_header = header;
            state.set_decode_fn(DecodeFn::HeaderValue)
        }
        None => {
            let mut status = DecodeStatus::ContinueDecoding;
            if let Some(listener) = state.listener.as_mut() {
                status = listener.on_unknown_header_name(token.as_slice());
            }
            state.set_decode_fn_after_listener_call(DecodeFn::HeaderValue, status)
        }
    }
}

/// ヘッダー値をデコードし、ヘッダーごとの意味を適用する
pub(super) fn decode_header_value(
    state: &mut RequestDecoder<'_>,
    view: &mut ByteView<'_>,
) -> DecodeStatus {
    if !skip_leading_optional_whitespace(view) {
        return DecodeStatus::NeedMoreInput;
    }
    let Some(mut value) = view.split_matching_prefix(is_field_content) else {
        return DecodeStatus::NeedMoreInput;
    };
    trim_trailing_optional_whitespace(&mut value);

    let mut status = DecodeStatus::ContinueDecoding;
    match state.current_header {
        HttpHeader::Accept => {
            // 複数の Accept ヘッダーは追跡しない。部分列の検索なので
            // "xxapplication/json+xyz" のようなものにも一致するが、
            // この用途には十分。
            if !value.contains_str(b"application/json") {
                if let Some(listener) = state.listener.as_mut() {
                    // kContinueDecoding であってもリスナーのステータスを
                    // 採用する。クライアントが JSON を望まなくても JSON
                    // を返すことはこのサーバーにとって問題ではない。
                    status = listener.on_extra_header(HttpHeader::Accept, value.as_slice());
                }
            }
        }
        HttpHeader::ContentLength => {
            // GET / HEAD では Content-Length を使わないので、壊れた値で
            // あっても構わない。
            let converted = value.to_u32();
            let content_length = converted.unwrap_or(0);
            let needed = state.request.http_method == HttpMethod::Put;
            if state.found_content_length
                || converted.is_none()
                || (content_length as usize > MAX_PAYLOAD_SIZE && needed)
            {
                if let Some(listener) = state.listener.as_mut() {
                    status = listener.on_extra_header(HttpHeader::ContentLength, value.as_slice());
                }
                if status <= DecodeStatus::HttpOk {
                    status = if content_length > 0 {
                        // このデコーダーには大きすぎる。
                        DecodeStatus::HttpPayloadTooLarge
                    } else {
                        DecodeStatus::HttpBadRequest
                    };
                }
            } else if needed {
                state.remaining_content_length = content_length as usize;
                state.found_content_length = true;
            }
        }
        HttpHeader::ContentType => {
            if state.request.http_method == HttpMethod::Put
                && value.as_slice() != b"application/x-www-form-urlencoded"
            {
                if let Some(listener) = state.listener.as_mut() {
                    status = listener.on_extra_header(HttpHeader::ContentType, value.as_slice());
                }
                if status <= DecodeStatus::HttpOk {
                    status = DecodeStatus::HttpUnsupportedMediaType;
                }
            }
        }
        HttpHeader::Unknown => {
            if let Some(listener) = state.listener.as_mut() {
                status = listener.on_unknown_header_value(value.as_slice());
            }
        }
        header => {
            // 既知だが組み込みの解釈はない。
            if let Some(listener) = state.listener.as_mut() {
                status = listener.on_extra_header(header, value.as_slice());
            }
        }
    }
    state.set_decode_fn_after_listener_call(DecodeFn::HeaderLineEnd, status)
}

/// ヘッダー行末尾の `\r\n` をデコードする
pub(super) fn decode_header_line_end(
    state: &mut RequestDecoder<'_>,
    view: &mut ByteView<'_>,
) -> DecodeStatus {
    if view.match_and_consume(END_OF_HEADER_LINE) {
        state.set_decode_fn(DecodeFn::HeaderLines)
    } else if END_OF_HEADER_LINE.starts_with(view.as_slice()) {
        DecodeStatus::NeedMoreInput
    } else {
        // 行が期待どおりに終わっていない。例えば `\r\n` ではなく `\n`。
        DecodeStatus::HttpBadRequest
    }
}
