//! リテラル照合テーブル
//!
//! マッチしたバイト範囲を列挙定数に割り当てる。照合は ASCII の大文字
//! 小文字を無視した完全一致で、部分一致や前方一致は行わない。例外は
//! API バージョンのリテラル `"v1"` と管理 API の `"apiversions"` で、
//! これらはデコード関数側でバイト単位の完全一致として照合される。

use crate::constants::{
    ApiGroup, DeviceMethod, DeviceType, HttpHeader, HttpMethod, ManagementMethod, Parameter,
    SensorName,
};

/// テーブルから大文字小文字を無視して検索する
fn match_in<T: Copy>(table: &[(&[u8], T)], text: &[u8]) -> Option<T> {
    table
        .iter()
        .find(|(literal, _)| text.eq_ignore_ascii_case(literal))
        .map(|&(_, value)| value)
}

const HTTP_METHODS: &[(&[u8], HttpMethod)] = &[
    (b"GET", HttpMethod::Get),
    (b"PUT", HttpMethod::Put),
    (b"HEAD", HttpMethod::Head),
];

const API_GROUPS: &[(&[u8], ApiGroup)] = &[
    (b"api", ApiGroup::Device),
    (b"management", ApiGroup::Management),
    (b"setup", ApiGroup::Setup),
];

const DEVICE_TYPES: &[(&[u8], DeviceType)] = &[
    (b"camera", DeviceType::Camera),
    (b"covercalibrator", DeviceType::CoverCalibrator),
    (b"dome", DeviceType::Dome),
    (b"filterwheel", DeviceType::FilterWheel),
    (b"focuser", DeviceType::Focuser),
    (b"observingconditions", DeviceType::ObservingConditions),
    (b"rotator", DeviceType::Rotator),
    (b"safetymonitor", DeviceType::SafetyMonitor),
    (b"switch", DeviceType::Switch),
    (b"telescope", DeviceType::Telescope),
];

/// すべてのデバイス種別に共通のメソッド
const COMMON_METHODS: &[(&[u8], DeviceMethod)] = &[
    (b"connected", DeviceMethod::Connected),
    (b"description", DeviceMethod::Description),
    (b"driverinfo", DeviceMethod::DriverInfo),
    (b"driverversion", DeviceMethod::DriverVersion),
    (b"interfaceversion", DeviceMethod::InterfaceVersion),
    (b"name", DeviceMethod::Name),
    (b"supportedactions", DeviceMethod::SupportedActions),
];

const COVER_CALIBRATOR_METHODS: &[(&[u8], DeviceMethod)] = &[
    (b"brightness", DeviceMethod::Brightness),
    (b"calibratoroff", DeviceMethod::CalibratorOff),
    (b"calibratoron", DeviceMethod::CalibratorOn),
    (b"calibratorstate", DeviceMethod::CalibratorState),
    (b"closecover", DeviceMethod::CloseCover),
    (b"coverstate", DeviceMethod::CoverState),
    (b"haltcover", DeviceMethod::HaltCover),
    (b"maxbrightness", DeviceMethod::MaxBrightness),
    (b"opencover", DeviceMethod::OpenCover),
];

const OBSERVING_CONDITIONS_METHODS: &[(&[u8], DeviceMethod)] = &[
    (b"averageperiod", DeviceMethod::AveragePeriod),
    (b"cloudcover", DeviceMethod::CloudCover),
    (b"dewpoint", DeviceMethod::DewPoint),
    (b"humidity", DeviceMethod::Humidity),
    (b"pressure", DeviceMethod::Pressure),
    (b"rainrate", DeviceMethod::RainRate),
    (b"refresh", DeviceMethod::Refresh),
    (b"sensordescription", DeviceMethod::SensorDescription),
    (b"skybrightness", DeviceMethod::SkyBrightness),
    (b"skyquality", DeviceMethod::SkyQuality),
    (b"skytemperature", DeviceMethod::SkyTemperature),
    (b"starfwhm", DeviceMethod::StarFwhm),
    (b"temperature", DeviceMethod::Temperature),
    (b"timesincelastupdate", DeviceMethod::TimeSinceLastUpdate),
    (b"winddirection", DeviceMethod::WindDirection),
    (b"windgust", DeviceMethod::WindGust),
    (b"windspeed", DeviceMethod::WindSpeed),
];

const SAFETY_MONITOR_METHODS: &[(&[u8], DeviceMethod)] =
    &[(b"issafe", DeviceMethod::IsSafe)];

const SWITCH_METHODS: &[(&[u8], DeviceMethod)] = &[
    (b"canwrite", DeviceMethod::CanWrite),
    (b"getswitch", DeviceMethod::GetSwitch),
    (b"getswitchdescription", DeviceMethod::GetSwitchDescription),
    (b"getswitchname", DeviceMethod::GetSwitchName),
    (b"getswitchvalue", DeviceMethod::GetSwitchValue),
    (b"maxswitch", DeviceMethod::MaxSwitch),
    (b"maxswitchvalue", DeviceMethod::MaxSwitchValue),
    (b"minswitchvalue", DeviceMethod::MinSwitchValue),
    (b"setswitch", DeviceMethod::SetSwitch),
    (b"setswitchname", DeviceMethod::SetSwitchName),
    (b"setswitchvalue", DeviceMethod::SetSwitchValue),
    (b"switchstep", DeviceMethod::SwitchStep),
];

const MANAGEMENT_METHODS: &[(&[u8], ManagementMethod)] = &[
    (b"description", ManagementMethod::Description),
    (b"configureddevices", ManagementMethod::ConfiguredDevices),
];

const PARAMETERS: &[(&[u8], Parameter)] = &[
    (b"clientid", Parameter::ClientId),
    (b"clienttransactionid", Parameter::ClientTransactionId),
    (b"connected", Parameter::Connected),
    (b"id", Parameter::Id),
    (b"name", Parameter::Name),
    (b"raw", Parameter::Raw),
    (b"sensorname", Parameter::SensorName),
    (b"state", Parameter::State),
    (b"value", Parameter::Value),
];

const HTTP_HEADERS: &[(&[u8], HttpHeader)] = &[
    (b"accept", HttpHeader::Accept),
    (b"content-encoding", HttpHeader::ContentEncoding),
    (b"content-length", HttpHeader::ContentLength),
    (b"content-type", HttpHeader::ContentType),
];

const SENSOR_NAMES: &[(&[u8], SensorName)] = &[
    (b"cloudcover", SensorName::CloudCover),
    (b"dewpoint", SensorName::DewPoint),
    (b"humidity", SensorName::Humidity),
    (b"pressure", SensorName::Pressure),
    (b"rainrate", SensorName::RainRate),
    (b"skybrightness", SensorName::SkyBrightness),
    (b"skyquality", SensorName::SkyQuality),
    (b"skytemperature", SensorName::SkyTemperature),
    (b"starfwhm", SensorName::StarFwhm),
    (b"temperature", SensorName::Temperature),
    (b"winddirection", SensorName::WindDirection),
    (b"windgust", SensorName::WindGust),
    (b"windspeed", SensorName::WindSpeed),
];

pub(crate) fn match_http_method(text: &[u8]) -> Option<HttpMethod> {
    match_in(HTTP_METHODS, text)
}

pub(crate) fn match_api_group(text: &[u8]) -> Option<ApiGroup> {
    match_in(API_GROUPS, text)
}

pub(crate) fn match_device_type(text: &[u8]) -> Option<DeviceType> {
    match_in(DEVICE_TYPES, text)
}

/// デバイスメソッドを照合する
///
/// Setup グループでは `setup` のみが一致する。Device グループでは
/// デバイス種別ごとのテーブルと共通テーブルが一致対象で、`setup` は
/// 決して一致しない。
pub(crate) fn match_device_method(
    group: ApiGroup,
    device_type: DeviceType,
    text: &[u8],
) -> Option<DeviceMethod> {
    if group == ApiGroup::Setup {
        return if text.eq_ignore_ascii_case(b"setup") {
            Some(DeviceMethod::Setup)
        } else {
            None
        };
    }
    let specific: &[(&[u8], DeviceMethod)] = match device_type {
        DeviceType::CoverCalibrator => COVER_CALIBRATOR_METHODS,
        DeviceType::ObservingConditions => OBSERVING_CONDITIONS_METHODS,
        DeviceType::SafetyMonitor => SAFETY_MONITOR_METHODS,
        DeviceType::Switch => SWITCH_METHODS,
        _ => &[],
    };
    match_in(specific, text).or_else(|| match_in(COMMON_METHODS, text))
}

pub(crate) fn match_management_method(text: &[u8]) -> Option<ManagementMethod> {
    match_in(MANAGEMENT_METHODS, text)
}

pub(crate) fn match_parameter(text: &[u8]) -> Option<Parameter> {
    match_in(PARAMETERS, text)
}

pub(crate) fn match_http_header(text: &[u8]) -> Option<HttpHeader> {
    match_in(HTTP_HEADERS, text)
}

pub(crate) fn match_sensor_name(text: &[u8]) -> Option<SensorName> {
    match_in(SENSOR_NAMES, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_method_is_case_insensitive() {
        assert_eq!(match_http_method(b"GET"), Some(HttpMethod::Get));
        assert_eq!(match_http_method(b"get"), Some(HttpMethod::Get));
        assert_eq!(match_http_method(b"Put"), Some(HttpMethod::Put));
        assert_eq!(match_http_method(b"head"), Some(HttpMethod::Head));
        assert_eq!(match_http_method(b"POST"), None);
        assert_eq!(match_http_method(b"GE"), None);
        assert_eq!(match_http_method(b"GETX"), None);
        assert_eq!(match_http_method(b""), None);
    }

    #[test]
    fn device_type_is_case_insensitive() {
        assert_eq!(
            match_device_type(b"safetymonitor"),
            Some(DeviceType::SafetyMonitor)
        );
        assert_eq!(
            match_device_type(b"SafetyMonitor"),
            Some(DeviceType::SafetyMonitor)
        );
        assert_eq!(
            match_device_type(b"OBSERVINGCONDITIONS"),
            Some(DeviceType::ObservingConditions)
        );
        assert_eq!(match_device_type(b"safetymonito"), None);
        assert_eq!(match_device_type(b"laserbeam"), None);
    }

    #[test]
    fn setup_group_matches_only_setup() {
        assert_eq!(
            match_device_method(ApiGroup::Setup, DeviceType::SafetyMonitor, b"setup"),
            Some(DeviceMethod::Setup)
        );
        assert_eq!(
            match_device_method(ApiGroup::Setup, DeviceType::SafetyMonitor, b"SETUP"),
            Some(DeviceMethod::Setup)
        );
        assert_eq!(
            match_device_method(ApiGroup::Setup, DeviceType::SafetyMonitor, b"issafe"),
            None
        );
    }

    #[test]
    fn device_group_never_matches_setup() {
        assert_eq!(
            match_device_method(ApiGroup::Device, DeviceType::SafetyMonitor, b"setup"),
            None
        );
    }

    #[test]
    fn device_method_is_constrained_by_device_type() {
        assert_eq!(
            match_device_method(ApiGroup::Device, DeviceType::SafetyMonitor, b"issafe"),
            Some(DeviceMethod::IsSafe)
        );
        assert_eq!(
            match_device_method(ApiGroup::Device, DeviceType::Switch, b"issafe"),
            None
        );
        assert_eq!(
            match_device_method(ApiGroup::Device, DeviceType::Switch, b"getswitchvalue"),
            Some(DeviceMethod::GetSwitchValue)
        );
        assert_eq!(
            match_device_method(ApiGroup::Device, DeviceType::ObservingConditions, b"refresh"),
            Some(DeviceMethod::Refresh)
        );
        // 共通メソッドはどのデバイス種別でも一致する
        assert_eq!(
            match_device_method(ApiGroup::Device, DeviceType::Telescope, b"connected"),
            Some(DeviceMethod::Connected)
        );
        assert_eq!(
            match_device_method(ApiGroup::Device, DeviceType::Dome, b"Name"),
            Some(DeviceMethod::Name)
        );
    }

    #[test]
    fn parameter_names_are_case_insensitive() {
        assert_eq!(match_parameter(b"ClientID"), Some(Parameter::ClientId));
        assert_eq!(
            match_parameter(b"clienttransactionid"),
            Some(Parameter::ClientTransactionId)
        );
        assert_eq!(
            match_parameter(b"ClienttransACTIONid"),
            Some(Parameter::ClientTransactionId)
        );
        assert_eq!(match_parameter(b"raw"), Some(Parameter::Raw));
        assert_eq!(match_parameter(b"AbC"), None);
    }

    #[test]
    fn header_names_are_case_insensitive() {
        assert_eq!(match_http_header(b"Accept"), Some(HttpHeader::Accept));
        assert_eq!(
            match_http_header(b"CONTENT-LENGTH"),
            Some(HttpHeader::ContentLength)
        );
        assert_eq!(
            match_http_header(b"content-TYPE"),
            Some(HttpHeader::ContentType)
        );
        assert_eq!(match_http_header(b"Connection"), None);
        assert_eq!(match_http_header(b"Host"), None);
    }

    #[test]
    fn sensor_names_match() {
        assert_eq!(match_sensor_name(b"DewPoint"), Some(SensorName::DewPoint));
        assert_eq!(match_sensor_name(b"dewpoint"), Some(SensorName::DewPoint));
        assert_eq!(match_sensor_name(b"bogus"), None);
    }

    #[test]
    fn management_methods_match() {
        assert_eq!(
            match_management_method(b"description"),
            Some(ManagementMethod::Description)
        );
        assert_eq!(
            match_management_method(b"ConfiguredDevices"),
            Some(ManagementMethod::ConfiguredDevices)
        );
        assert_eq!(match_management_method(b"apiversions"), None);
    }
}
