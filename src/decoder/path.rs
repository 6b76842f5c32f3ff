//! スタートラインのデコード関数
//!
//! HTTP メソッドからパス終端までを担当する。トークンの切り出しは
//! すべて「終端文字が窓の中に見えるまで消費しない」方針で、これが
//! 有界バッファ保証 (431 昇格) の前提になる。

use crate::constants::{AlpacaApi, ApiGroup, ManagementMethod};
use crate::match_literals::{
    match_api_group, match_device_method, match_device_type, match_http_method,
    match_management_method,
};
use crate::status::DecodeStatus;
use crate::view::ByteView;

use super::phase::DecodeFn;
use super::{is_name_char, RequestDecoder};

/// サポートする API バージョン
///
/// `"apiversions"` と同様、大文字小文字を区別して照合する。
const SUPPORTED_VERSION: &[u8] = b"v1";

/// リクエスト先頭の HTTP メソッド名をデコードする
///
/// 行頭の空白は許容しない。1 接続 1 リクエストの前提なので、区切りの
/// 曖昧さを吸収する必要がない。
pub(super) fn decode_http_method(
    state: &mut RequestDecoder<'_>,
    view: &mut ByteView<'_>,
) -> DecodeStatus {
    let Some(token) = view.split_matching_prefix(is_name_char) else {
        return DecodeStatus::NeedMoreInput;
    };
    if !view.match_and_consume(b" ") {
        return DecodeStatus::HttpBadRequest;
    }
    match match_http_method(token.as_slice()) {
        Some(method) => {
            state.request.http_method = method;
            state.set_decode_fn(DecodeFn::StartOfPath)
        }
        None => DecodeStatus::HttpMethodNotImplemented,
    }
}

/// パスの先頭は必ず `/`
pub(super) fn match_start_of_path(
    state: &mut RequestDecoder<'_>,
    view: &mut ByteView<'_>,
) -> DecodeStatus {
    if view.is_empty() {
        DecodeStatus::NeedMoreInput
    } else if view.match_and_consume(b"/") {
        state.set_decode_fn(DecodeFn::ApiGroup)
    } else {
        DecodeStatus::HttpBadRequest
    }
}

/// 先頭の `/` に続く API グループ名をデコードする
pub(super) fn decode_api_group(
    state: &mut RequestDecoder<'_>,
    view: &mut ByteView<'_>,
) -> DecodeStatus {
    let Some(token) = view.split_matching_prefix(is_name_char) else {
        return DecodeStatus::NeedMoreInput;
    };
    let Some(group) = match_api_group(token.as_slice()) else {
        return DecodeStatus::HttpNotFound;
    };
    state.request.api_group = group;
    if view.match_and_consume(b"/") {
        // パスが続く。デバイスグループ以外への書き込みメソッドは不許可。
        if !state.request.http_method.is_read() && group != ApiGroup::Device {
            return DecodeStatus::HttpMethodNotAllowed;
        }
        if group == ApiGroup::Management {
            return state.set_decode_fn(DecodeFn::ManagementType);
        }
        state.request.api = if group == ApiGroup::Setup {
            AlpacaApi::DeviceSetup
        } else {
            AlpacaApi::DeviceApi
        };
        return state.set_decode_fn(DecodeFn::ApiVersion);
    }
    // パスがここで終わるのはサーバー設定ページ (`/setup`) だけ。
    if group != ApiGroup::Setup {
        return DecodeStatus::HttpNotFound;
    }
    state.request.api = AlpacaApi::ServerSetup;
    if !state.request.http_method.is_read() {
        return DecodeStatus::HttpMethodNotAllowed;
    }
    state.set_decode_fn(DecodeFn::EndOfPath)
}

/// API バージョンセグメント (`v1/`) をデコードする
pub(super) fn decode_api_version(
    state: &mut RequestDecoder<'_>,
    view: &mut ByteView<'_>,
) -> DecodeStatus {
    let Some(token) = view.split_matching_prefix(is_name_char) else {
        return DecodeStatus::NeedMoreInput;
    };
    if !view.match_and_consume(b"/") {
        return DecodeStatus::HttpNotFound;
    }
    if token.as_slice() == SUPPORTED_VERSION {
        state.set_decode_fn(DecodeFn::DeviceType)
    } else {
        DecodeStatus::HttpNotFound
    }
}

/// デバイス種別セグメントをデコードする
pub(super) fn decode_device_type(
    state: &mut RequestDecoder<'_>,
    view: &mut ByteView<'_>,
) -> DecodeStatus {
    let Some(token) = view.split_matching_prefix(is_name_char) else {
        return DecodeStatus::NeedMoreInput;
    };
    if !view.match_and_consume(b"/") {
        return DecodeStatus::HttpNotFound;
    }
    match match_device_type(token.as_slice()) {
        Some(device_type) => {
            state.request.device_type = device_type;
            state.set_decode_fn(DecodeFn::DeviceNumber)
        }
        None => DecodeStatus::HttpNotFound,
    }
}

/// デバイス番号セグメントをデコードする
///
/// 非数字や u32 のオーバーフローは、ルートではなく数値としての不正
/// なので 400 を返す。
pub(super) fn decode_device_number(
    state: &mut RequestDecoder<'_>,
    view: &mut ByteView<'_>,
) -> DecodeStatus {
    let Some(token) = view.split_matching_prefix(is_name_char) else {
        return DecodeStatus::NeedMoreInput;
    };
    if !view.match_and_consume(b"/") {
        return DecodeStatus::HttpNotFound;
    }
    match token.to_u32() {
        Some(number) => {
            state.request.device_number = number;
            state.set_decode_fn(DecodeFn::DeviceMethod)
        }
        None => DecodeStatus::HttpBadRequest,
    }
}

/// デバイスメソッドセグメントをデコードする
///
/// 終端文字 (`?` または ` `) は消費しない。`DecodeFn::EndOfPath` が扱う。
pub(super) fn decode_device_method(
    state: &mut RequestDecoder<'_>,
    view: &mut ByteView<'_>,
) -> DecodeStatus {
    let Some(token) = view.split_matching_prefix(is_name_char) else {
        return DecodeStatus::NeedMoreInput;
    };
    if !matches!(view.front(), Some(b'?') | Some(b' ')) {
        return DecodeStatus::HttpNotFound;
    }
    match match_device_method(
        state.request.api_group,
        state.request.device_type,
        token.as_slice(),
    ) {
        Some(method) => {
            state.request.device_method = method;
            state.set_decode_fn(DecodeFn::EndOfPath)
        }
        None => DecodeStatus::HttpNotFound,
    }
}

/// `/management/` に続くセグメントをデコードする
pub(super) fn decode_management_type(
    state: &mut RequestDecoder<'_>,
    view: &mut ByteView<'_>,
) -> DecodeStatus {
    let Some(token) = view.split_matching_prefix(is_name_char) else {
        return DecodeStatus::NeedMoreInput;
    };
    if token.as_slice() == SUPPORTED_VERSION {
        if view.match_and_consume(b"/") {
            state.set_decode_fn(DecodeFn::ManagementMethod)
        } else {
            DecodeStatus::HttpNotFound
        }
    } else if token.as_slice() == b"apiversions" {
        state.request.api = AlpacaApi::ManagementApiVersions;
        state.set_decode_fn(DecodeFn::EndOfPath)
    } else {
        DecodeStatus::HttpNotFound
    }
}

/// `/management/v1/` に続くメソッド名をデコードする
pub(super) fn decode_management_method(
    state: &mut RequestDecoder<'_>,
    view: &mut ByteView<'_>,
) -> DecodeStatus {
    let Some(token) = view.split_matching_prefix(is_name_char) else {
        return DecodeStatus::NeedMoreInput;
    };
    match match_management_method(token.as_slice()) {
        Some(method) => {
            state.request.api = match method {
                ManagementMethod::Description => AlpacaApi::ManagementDescription,
                ManagementMethod::ConfiguredDevices => AlpacaApi::ManagementConfiguredDevices,
                ManagementMethod::Unknown => return DecodeStatus::HttpInternalServerError,
            };
            state.set_decode_fn(DecodeFn::EndOfPath)
        }
        None => DecodeStatus::HttpNotFound,
    }
}

/// パス終端をデコードする
///
/// `?` ならクエリパラメータへ、` ` なら HTTP バージョンへ。それ以外は
/// パスが想定より長い。
pub(super) fn decode_end_of_path(
    state: &mut RequestDecoder<'_>,
    view: &mut ByteView<'_>,
) -> DecodeStatus {
    // 直前のセグメントの終端を確認できた時点で、区切り文字は必ず窓の
    // 中にある。
    if view.is_empty() {
        return DecodeStatus::NeedMoreInput;
    }
    if view.match_and_consume(b"?") {
        state.set_decode_fn(DecodeFn::ParamName)
    } else if view.match_and_consume(b" ") {
        state.set_decode_fn(DecodeFn::HttpVersion)
    } else {
        DecodeStatus::HttpNotFound
    }
}
