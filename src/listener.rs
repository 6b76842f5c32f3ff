//! デコーダーの拡張フックであるリスナーの定義

use crate::constants::{HttpHeader, Parameter};
use crate::status::DecodeStatus;

/// デコーダーが解釈しないトークンを受け取るリスナー
///
/// すべてのメソッドはデフォルトで [`DecodeStatus::ContinueDecoding`] を
/// 返す。エラーステータス (400 以上) を返すとデコードはそのステータス
/// で終了する。[`DecodeStatus::NeedMoreInput`] を返すのはプログラミング
/// エラーで、デコーダーは 500 を返す。
///
/// *extra* は「タグとしては既知だが、この文脈では予期しない・デコーダー
/// が解釈しない」トークン (例: 重複した `ClientID`、`Content-Encoding`
/// ヘッダー)。*unknown* はタグ照合に失敗したトークンで、名前と値が別々
/// のコールバックで渡される。
pub trait RequestDecoderListener {
    /// 既知だが解釈されないパラメータの値
    fn on_extra_parameter(&mut self, _param: Parameter, _value: &[u8]) -> DecodeStatus {
        DecodeStatus::ContinueDecoding
    }

    /// 既知だが解釈されないヘッダーの値
    fn on_extra_header(&mut self, _header: HttpHeader, _value: &[u8]) -> DecodeStatus {
        DecodeStatus::ContinueDecoding
    }

    /// 未知のパラメータ名
    fn on_unknown_parameter_name(&mut self, _name: &[u8]) -> DecodeStatus {
        DecodeStatus::ContinueDecoding
    }

    /// 未知のパラメータの値
    fn on_unknown_parameter_value(&mut self, _value: &[u8]) -> DecodeStatus {
        DecodeStatus::ContinueDecoding
    }

    /// 未知のヘッダー名
    fn on_unknown_header_name(&mut self, _name: &[u8]) -> DecodeStatus {
        DecodeStatus::ContinueDecoding
    }

    /// 未知のヘッダーの値
    fn on_unknown_header_value(&mut self, _value: &[u8]) -> DecodeStatus {
        DecodeStatus::ContinueDecoding
    }
}
