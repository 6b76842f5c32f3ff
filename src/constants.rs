//! ASCOM Alpaca リクエストの列挙型定義
//!
//! リクエスト内のトークンは [`crate::match_literals`] の大文字小文字を
//! 無視したテーブル照合でこれらの定数に割り当てられる。いずれの列挙型も
//! `Unknown` が「未照合」を表す。

/// HTTP メソッド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// 未照合
    Unknown,
    Get,
    Put,
    Head,
}

impl HttpMethod {
    /// 読み取り系メソッドかどうか (GET / HEAD)
    pub fn is_read(self) -> bool {
        matches!(self, HttpMethod::Get | HttpMethod::Head)
    }
}

/// パス先頭の API グループ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiGroup {
    /// 未照合
    Unknown,
    /// `/api/...`
    Device,
    /// `/management/...`
    Management,
    /// `/setup` または `/setup/...`
    Setup,
}

/// リクエストが対象とする API の細分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlpacaApi {
    /// 未照合
    Unknown,
    /// `/api/v1/<type>/<number>/<method>`
    DeviceApi,
    /// `/setup/v1/<type>/<number>/setup`
    DeviceSetup,
    /// `/setup`
    ServerSetup,
    /// `/management/apiversions`
    ManagementApiVersions,
    /// `/management/v1/description`
    ManagementDescription,
    /// `/management/v1/configureddevices`
    ManagementConfiguredDevices,
}

/// ASCOM デバイス種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    /// 未照合
    Unknown,
    Camera,
    CoverCalibrator,
    Dome,
    FilterWheel,
    Focuser,
    ObservingConditions,
    Rotator,
    SafetyMonitor,
    Switch,
    Telescope,
}

/// ASCOM デバイスメソッド
///
/// 共通メソッドに加え、本サーバーが扱うデバイス種別
/// (CoverCalibrator / ObservingConditions / SafetyMonitor / Switch) の
/// 固有メソッドを持つ。照合は `(api_group, device_type)` で制約される。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceMethod {
    /// 未照合
    Unknown,
    /// `/setup/v1/...` の末尾セグメント専用
    Setup,

    // 共通メソッド
    Connected,
    Description,
    DriverInfo,
    DriverVersion,
    InterfaceVersion,
    Name,
    SupportedActions,

    // CoverCalibrator
    Brightness,
    CalibratorOff,
    CalibratorOn,
    CalibratorState,
    CloseCover,
    CoverState,
    HaltCover,
    MaxBrightness,
    OpenCover,

    // ObservingConditions
    AveragePeriod,
    CloudCover,
    DewPoint,
    Humidity,
    Pressure,
    RainRate,
    Refresh,
    SensorDescription,
    SkyBrightness,
    SkyQuality,
    SkyTemperature,
    StarFwhm,
    Temperature,
    TimeSinceLastUpdate,
    WindDirection,
    WindGust,
    WindSpeed,

    // SafetyMonitor
    IsSafe,

    // Switch
    CanWrite,
    GetSwitch,
    GetSwitchDescription,
    GetSwitchName,
    GetSwitchValue,
    MaxSwitch,
    MaxSwitchValue,
    MinSwitchValue,
    SetSwitch,
    SetSwitchName,
    SetSwitchValue,
    SwitchStep,
}

/// 管理 API のメソッド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagementMethod {
    /// 未照合
    Unknown,
    /// `/management/v1/description`
    Description,
    /// `/management/v1/configureddevices`
    ConfiguredDevices,
}

/// クエリ/ボディパラメータのタグ
///
/// `ClientId` から `SensorName` まではデコーダーが値を解釈する。
/// `Connected` / `Name` / `Raw` は既知だが解釈せず、リスナーに
/// *extra parameter* として渡される。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    /// 未照合
    Unknown,
    ClientId,
    ClientTransactionId,
    Id,
    Value,
    State,
    SensorName,
    Connected,
    Name,
    Raw,
}

/// HTTP ヘッダーのタグ
///
/// `ContentEncoding` は既知だが解釈せず、リスナーに渡される。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpHeader {
    /// 未照合
    Unknown,
    Accept,
    ContentLength,
    ContentType,
    ContentEncoding,
}

/// ObservingConditions の SensorName パラメータ値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorName {
    /// 未照合 (パラメータ未指定を兼ねる)
    Unknown,
    CloudCover,
    DewPoint,
    Humidity,
    Pressure,
    RainRate,
    SkyBrightness,
    SkyQuality,
    SkyTemperature,
    StarFwhm,
    Temperature,
    WindDirection,
    WindGust,
    WindSpeed,
}
