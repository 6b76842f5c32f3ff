//! PBT テスト共通ユーティリティ

use alpaca_http11::{AlpacaRequest, ByteView, DecodeStatus, RequestDecoder};
use proptest::prelude::*;

// ========================================
// トークン生成
// ========================================

/// パラメータ名・ヘッダー名に使える文字
pub fn name_char() -> impl Strategy<Value = char> {
    prop_oneof![
        prop::char::range('a', 'z'),
        prop::char::range('A', 'Z'),
        prop::char::range('0', '9'),
        Just('-'),
        Just('_'),
    ]
}

/// パラメータ名 (1-24 文字)
pub fn param_name() -> impl Strategy<Value = String> {
    proptest::collection::vec(name_char(), 1..=24).prop_map(|chars| chars.into_iter().collect())
}

/// パラメータ値に使える文字 (区切りと衝突する '=' は除く)
pub fn param_value_char() -> impl Strategy<Value = char> {
    prop_oneof![
        prop::char::range('a', 'z'),
        prop::char::range('A', 'Z'),
        prop::char::range('0', '9'),
        Just('-'),
        Just('_'),
        Just('%'),
        Just('.'),
    ]
}

/// パラメータ値 (0-24 文字)
pub fn param_value() -> impl Strategy<Value = String> {
    proptest::collection::vec(param_value_char(), 0..=24)
        .prop_map(|chars| chars.into_iter().collect())
}

/// デコーダーが解釈するパラメータ名との衝突を避けたパラメータ名
pub fn unknown_param_name() -> impl Strategy<Value = String> {
    param_name().prop_filter("known parameter names are handled separately", |name| {
        !matches!(
            name.to_ascii_lowercase().as_str(),
            "clientid"
                | "clienttransactionid"
                | "connected"
                | "id"
                | "name"
                | "raw"
                | "sensorname"
                | "state"
                | "value"
        )
    })
}

/// ランダムに大文字化した文字列
pub fn random_case(text: &'static str) -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<bool>(), text.len()).prop_map(move |flips| {
        text.chars()
            .zip(flips)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

// ========================================
// デコードヘルパー
// ========================================

/// リクエストが chunk_size バイトずつ到着するシナリオでデコードする
///
/// 到着したバイトはバッファに蓄積され、最大 `ByteView::MAX_SIZE` の
/// 窓でデコーダーに渡される (到着の粒度と窓の容量は独立)。
pub fn decode_in_chunks(full_request: &[u8], chunk_size: usize) -> (DecodeStatus, AlpacaRequest) {
    let chunk_size = chunk_size.max(1);
    let mut decoder = RequestDecoder::new();
    decoder.reset();

    let mut buffer: Vec<u8> = Vec::new();
    let mut offset = 0;
    loop {
        let take = chunk_size.min(full_request.len() - offset);
        buffer.extend_from_slice(&full_request[offset..offset + take]);
        offset += take;
        let all_input_arrived = offset == full_request.len();

        loop {
            let window_size = buffer.len().min(ByteView::MAX_SIZE);
            let window = buffer[..window_size].to_vec();
            let mut view = ByteView::new(&window);
            let at_end = all_input_arrived && window_size == buffer.len();
            let buffer_is_full = window_size == ByteView::MAX_SIZE;
            let status = decoder.decode(&mut view, buffer_is_full, at_end);
            let removed = window_size - view.len();
            buffer.drain(..removed);

            if status != DecodeStatus::NeedMoreInput {
                return (status, decoder.request().clone());
            }
            if removed == 0 {
                break;
            }
        }
        if all_input_arrived {
            // これ以上進めない
            return (DecodeStatus::NeedMoreInput, decoder.request().clone());
        }
    }
}

/// リクエスト全体を一括で到着させてデコードする
pub fn decode_whole(full_request: &[u8]) -> (DecodeStatus, AlpacaRequest) {
    decode_in_chunks(full_request, full_request.len().max(1))
}

/// 窓の容量を制限してデコードする (431 昇格の検証用)
///
/// 入力は最初からすべて到着済みとして扱う。
pub fn decode_with_window(full_request: &[u8], window_size: usize) -> (DecodeStatus, AlpacaRequest) {
    let window_size = window_size.clamp(1, ByteView::MAX_SIZE);
    let mut decoder = RequestDecoder::new();
    decoder.reset();

    let mut buffer = full_request.to_vec();
    loop {
        let n = buffer.len().min(window_size);
        let window = buffer[..n].to_vec();
        let mut view = ByteView::new(&window);
        let at_end = n == buffer.len();
        let buffer_is_full = n == window_size;
        let status = decoder.decode(&mut view, buffer_is_full, at_end);
        let removed = n - view.len();
        buffer.drain(..removed);

        if status != DecodeStatus::NeedMoreInput || removed == 0 {
            return (status, decoder.request().clone());
        }
    }
}
