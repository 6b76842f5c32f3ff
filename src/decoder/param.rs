//! クエリ/ボディパラメータのデコード関数
//!
//! スタートラインのクエリと `application/x-www-form-urlencoded` ボディ
//! は同じ文法なので、同じ状態で両方を処理する。どちらを処理しているか
//! はデコーダーのフェーズフラグが区別する。

use crate::constants::{Parameter, SensorName};
use crate::match_literals::{match_parameter, match_sensor_name};
use crate::status::DecodeStatus;
use crate::view::ByteView;

use super::phase::DecodeFn;
use super::{is_name_char, RequestDecoder};

fn is_param_separator(c: u8) -> bool {
    c == b'&'
}

/// URL エンコードされたパラメータ値を構成できる文字
///
/// パーセントデコードは行わないため `%` はそのまま値の一部。小数値
/// (`Value=0.99999` など) のために `.` も許す。
fn is_param_value_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'-' | b'_' | b'=' | b'%' | b'.')
}

/// パラメータ名をデコードする
pub(super) fn decode_param_name(
    state: &mut RequestDecoder<'_>,
    view: &mut ByteView<'_>,
) -> DecodeStatus {
    let Some(token) = view.split_matching_prefix(is_name_char) else {
        return DecodeStatus::NeedMoreInput;
    };
    if !view.match_and_consume(b"=") {
        return DecodeStatus::HttpBadRequest;
    }
    state.current_parameter = Parameter::Unknown;
    match match_parameter(token.as_slice()) {
        Some(parameter) => {
            state.current_parameter = parameter;
            state.set_decode_fn(DecodeFn::ParamValue)
        }
        None => {
            let mut status = DecodeStatus::ContinueDecoding;
            if let Some(listener) = state.listener.as_mut() {
                status = listener.on_unknown_parameter_name(token.as_slice());
            }
            state.set_decode_fn_after_listener_call(DecodeFn::ParamValue, status)
        }
    }
}

/// 重複または解釈できなかったパラメータをリスナーに報告する
///
/// リスナーがエラーステータスを返さない限り、この種のパラメータは
/// デコード失敗 (400) になる。
fn report_extra_parameter(state: &mut RequestDecoder<'_>, value: &ByteView<'_>) -> DecodeStatus {
    let mut status = DecodeStatus::HttpBadRequest;
    let parameter = state.current_parameter;
    if let Some(listener) = state.listener.as_mut() {
        status = listener.on_extra_parameter(parameter, value.as_slice());
        if status <= DecodeStatus::HttpOk {
            status = DecodeStatus::HttpBadRequest;
        }
    }
    status
}

/// パラメータ値をデコードし、パラメータごとの意味を適用する
///
/// 値は空のこともあるため、ボディ終端と重なると終わりの検出が
/// 難しい点に注意。
pub(super) fn decode_param_value(
    state: &mut RequestDecoder<'_>,
    view: &mut ByteView<'_>,
) -> DecodeStatus {
    let value = match view.split_matching_prefix(is_param_value_char) {
        Some(value) => value,
        None => {
            if state.is_decoding_header || !state.is_final_input {
                return DecodeStatus::NeedMoreInput;
            }
            // ボディの最終入力なので、入力の終端を区切りとして扱える。
            let value = *view;
            view.remove_prefix(view.len());
            value
        }
    };

    let mut status = DecodeStatus::ContinueDecoding;
    match state.current_parameter {
        Parameter::ClientId => match value.to_u32() {
            Some(id) if !state.request.have_client_id => state.request.set_client_id(id),
            _ => status = report_extra_parameter(state, &value),
        },
        Parameter::ClientTransactionId => match value.to_u32() {
            Some(id) if !state.request.have_client_transaction_id => {
                state.request.set_client_transaction_id(id)
            }
            _ => status = report_extra_parameter(state, &value),
        },
        Parameter::Id => match value.to_u32() {
            Some(id) if !state.request.have_id => state.request.set_id(id),
            _ => status = report_extra_parameter(state, &value),
        },
        Parameter::Value => match value.to_f64() {
            Some(v) if !state.request.have_value => state.request.set_value(v),
            _ => status = report_extra_parameter(state, &value),
        },
        Parameter::State => match value.to_bool() {
            Some(s) if !state.request.have_state => state.request.set_state(s),
            _ => status = report_extra_parameter(state, &value),
        },
        Parameter::SensorName => {
            match match_sensor_name(value.as_slice()) {
                Some(name) if state.request.sensor_name == SensorName::Unknown => {
                    state.request.sensor_name = name;
                }
                _ => status = report_extra_parameter(state, &value),
            }
        }
        Parameter::Unknown => {
            if let Some(listener) = state.listener.as_mut() {
                status = listener.on_unknown_parameter_value(value.as_slice());
            }
        }
        parameter => {
            // 既知だが組み込みの解釈はない。
            if let Some(listener) = state.listener.as_mut() {
                status = listener.on_extra_parameter(parameter, value.as_slice());
            }
        }
    }
    state.set_decode_fn_after_listener_call(DecodeFn::ParamSeparator, status)
}

/// パラメータ区切りをデコードする
///
/// 連続する `&` は 1 つの区切りとして扱う。
pub(super) fn decode_param_separator(
    state: &mut RequestDecoder<'_>,
    view: &mut ByteView<'_>,
) -> DecodeStatus {
    let Some(beyond) = view.find_first_not_of(is_param_separator) else {
        // 見えている文字がすべて区切り (または空)。
        if !state.is_decoding_header && state.is_final_input {
            // ボディ終端に到達した。
            view.remove_prefix(view.len());
            return DecodeStatus::HttpOk;
        }
        // 次の文字も区切りかどうか分からないので、区切りを 1 つだけ
        // 残して追加入力を待つ。
        if view.len() > 1 {
            view.remove_prefix(view.len() - 1);
        }
        return DecodeStatus::NeedMoreInput;
    };

    view.remove_prefix(beyond);
    if view.front() == Some(b' ') {
        if state.is_decoding_start_line {
            view.remove_prefix(1);
            return state.set_decode_fn(DecodeFn::HttpVersion);
        }
        // ボディ内の空白は値の文字ではない。
        return DecodeStatus::HttpBadRequest;
    }
    state.set_decode_fn(DecodeFn::ParamName)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_value_chars_include_url_encoding_and_decimal() {
        for c in b"azAZ09-_=%.".iter().copied() {
            assert!(is_param_value_char(c), "{:?}", c as char);
        }
        for c in b" &?/\t[]".iter().copied() {
            assert!(!is_param_value_char(c), "{:?}", c as char);
        }
    }

    #[test]
    fn separator_chars() {
        assert!(is_param_separator(b'&'));
        assert!(!is_param_separator(b'='));
    }
}
