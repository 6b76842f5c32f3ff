//! デコード結果のリクエスト記述子

use crate::constants::{AlpacaApi, ApiGroup, DeviceMethod, DeviceType, HttpMethod, SensorName};

/// `device_number` の未設定を表す番兵値
pub const RESET_DEVICE_NUMBER: u32 = u32::MAX;
/// `client_id` の未設定を表す番兵値
pub const RESET_CLIENT_ID: u32 = u32::MAX;
/// `client_transaction_id` の未設定を表す番兵値
pub const RESET_CLIENT_TRANSACTION_ID: u32 = u32::MAX;

/// デコード済みの ASCOM Alpaca リクエスト
///
/// デコーダーが所有し、[`crate::RequestDecoder::request`] で参照できる。
/// 省略可能なフィールドは `have_*` フラグが立っているときだけ有効
/// (`sensor_name` は `SensorName::Unknown` が未指定を表す)。終端エラー
/// 時は途中まで埋まっていることがあり、エラー前に認識された内容の観察
/// 以外に使ってはならない。
#[derive(Debug, Clone, PartialEq)]
pub struct AlpacaRequest {
    /// HTTP メソッド
    pub http_method: HttpMethod,
    /// API グループ
    pub api_group: ApiGroup,
    /// API の細分類
    pub api: AlpacaApi,
    /// デバイス種別
    pub device_type: DeviceType,
    /// デバイス番号 (未設定時は [`RESET_DEVICE_NUMBER`])
    pub device_number: u32,
    /// デバイスメソッド
    pub device_method: DeviceMethod,

    /// ClientID パラメータ (有効なのは `have_client_id` のときのみ)
    pub client_id: u32,
    /// ClientTransactionID パラメータ
    pub client_transaction_id: u32,
    /// Id パラメータ (Switch 系メソッドで使用)
    pub id: u32,
    /// Value パラメータ
    pub value: f64,
    /// State パラメータ
    pub state: bool,
    /// SensorName パラメータ (`Unknown` は未指定)
    pub sensor_name: SensorName,

    pub have_client_id: bool,
    pub have_client_transaction_id: bool,
    pub have_id: bool,
    pub have_value: bool,
    pub have_state: bool,
}

impl AlpacaRequest {
    /// すべて未設定の記述子を作成
    pub fn new() -> Self {
        Self {
            http_method: HttpMethod::Unknown,
            api_group: ApiGroup::Unknown,
            api: AlpacaApi::Unknown,
            device_type: DeviceType::Unknown,
            device_number: RESET_DEVICE_NUMBER,
            device_method: DeviceMethod::Unknown,
            client_id: RESET_CLIENT_ID,
            client_transaction_id: RESET_CLIENT_TRANSACTION_ID,
            id: 0,
            value: 0.0,
            state: false,
            sensor_name: SensorName::Unknown,
            have_client_id: false,
            have_client_transaction_id: false,
            have_id: false,
            have_value: false,
            have_state: false,
        }
    }

    /// 未設定状態に戻す
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub(crate) fn set_client_id(&mut self, id: u32) {
        self.client_id = id;
        self.have_client_id = true;
    }

    pub(crate) fn set_client_transaction_id(&mut self, id: u32) {
        self.client_transaction_id = id;
        self.have_client_transaction_id = true;
    }

    pub(crate) fn set_id(&mut self, id: u32) {
        self.id = id;
        self.have_id = true;
    }

    pub(crate) fn set_value(&mut self, value: f64) {
        self.value = value;
        self.have_value = true;
    }

    pub(crate) fn set_state(&mut self, state: bool) {
        self.state = state;
        self.have_state = true;
    }
}

impl Default for AlpacaRequest {
    fn default() -> Self {
        Self::new()
    }
}
