//! デコード状態の定義
//!
//! 元になった設計の「状態ごとの関数ポインタ」をタグ付き列挙に置き換え、
//! 網羅的な `match` で遷移を駆動する。

use crate::status::DecodeStatus;
use crate::view::ByteView;

use super::{head, param, path, RequestDecoder};

/// デコード状態
///
/// 各バリアントが 1 つの純粋なデコード関数に対応する。関数は窓の
/// 先頭部分を消費し、次の状態への遷移・`NeedMoreInput`・終端ステータス
/// のいずれかを返す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DecodeFn {
    /// HTTP メソッド名待ち (初期状態)
    HttpMethod,
    /// パス先頭の `/` 待ち
    StartOfPath,
    /// API グループ名待ち
    ApiGroup,
    /// API バージョン (`v1`) 待ち
    ApiVersion,
    /// デバイス種別名待ち
    DeviceType,
    /// デバイス番号待ち
    DeviceNumber,
    /// デバイスメソッド名待ち
    DeviceMethod,
    /// `/management/` に続くセグメント待ち
    ManagementType,
    /// `/management/v1/` に続くメソッド名待ち
    ManagementMethod,
    /// パス終端 (`?` または ` `) 待ち
    EndOfPath,
    /// パラメータ名待ち
    ParamName,
    /// パラメータ値待ち
    ParamValue,
    /// パラメータ区切り (`&`) 待ち
    ParamSeparator,
    /// `HTTP/1.1\r\n` リテラル待ち
    HttpVersion,
    /// ヘッダー行の先頭 (ヘッダー終端の判定を含む)
    HeaderLines,
    /// ヘッダー名待ち
    HeaderName,
    /// ヘッダー値待ち
    HeaderValue,
    /// ヘッダー行末尾の `\r\n` 待ち
    HeaderLineEnd,
}

impl DecodeFn {
    /// 対応するデコード関数を 1 回適用する
    pub(crate) fn call(
        self,
        state: &mut RequestDecoder<'_>,
        view: &mut ByteView<'_>,
    ) -> DecodeStatus {
        match self {
            DecodeFn::HttpMethod => path::decode_http_method(state, view),
            DecodeFn::StartOfPath => path::match_start_of_path(state, view),
            DecodeFn::ApiGroup => path::decode_api_group(state, view),
            DecodeFn::ApiVersion => path::decode_api_version(state, view),
            DecodeFn::DeviceType => path::decode_device_type(state, view),
            DecodeFn::DeviceNumber => path::decode_device_number(state, view),
            DecodeFn::DeviceMethod => path::decode_device_method(state, view),
            DecodeFn::ManagementType => path::decode_management_type(state, view),
            DecodeFn::ManagementMethod => path::decode_management_method(state, view),
            DecodeFn::EndOfPath => path::decode_end_of_path(state, view),
            DecodeFn::ParamName => param::decode_param_name(state, view),
            DecodeFn::ParamValue => param::decode_param_value(state, view),
            DecodeFn::ParamSeparator => param::decode_param_separator(state, view),
            DecodeFn::HttpVersion => head::match_http_version(state, view),
            DecodeFn::HeaderLines => head::decode_header_lines(state, view),
            DecodeFn::HeaderName => head::decode_header_name(state, view),
            DecodeFn::HeaderValue => head::decode_header_value(state, view),
            DecodeFn::HeaderLineEnd => head::decode_header_line_end(state, view),
        }
    }
}
