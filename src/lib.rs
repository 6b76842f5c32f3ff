//! # alpaca_http11
//!
//! ASCOM Alpaca REST API 向けの HTTP/1.1 リクエストデコーダー (Sans I/O)
//!
//! ## 特徴
//!
//! - **依存なし**: 標準ライブラリのみ使用
//! - **Sans I/O**: I/O を完全に分離した設計
//! - **有界バッファ**: ヒープ割り当てなし。最大 255 バイトの窓を
//!   先頭から消費するだけで、リクエスト全体を一度に見る必要がない
//!
//! ## 使い方
//!
//! 呼び出し側がトランスポート (通常は組み込み Ethernet ソケット) から
//! バッファを埋め、デコーダーに繰り返し渡す。デコーダーは記述子の完成
//! (`HttpOk`)・確定的な HTTP エラー・追加入力の要求 (`NeedMoreInput`)
//! のいずれかを返す。
//!
//! ```rust
//! use alpaca_http11::{ByteView, DecodeStatus, DeviceMethod, RequestDecoder};
//!
//! let mut decoder = RequestDecoder::new();
//! decoder.reset();
//!
//! let input = b"GET /api/v1/safetymonitor/0/issafe HTTP/1.1\r\n\r\n";
//! let mut view = ByteView::new(input);
//! let status = decoder.decode(&mut view, false, true);
//!
//! assert_eq!(status, DecodeStatus::HttpOk);
//! assert_eq!(decoder.request().device_number, 0);
//! assert_eq!(decoder.request().device_method, DeviceMethod::IsSafe);
//! ```
//!
//! 1 つのデコーダーは進行中の 1 リクエスト専用で、各リクエストの前に
//! `reset()` が必要。デコードしないトークン (未知のパラメータや
//! ヘッダーなど) は [`RequestDecoderListener`] で受け取れる。

mod constants;
mod decoder;
mod listener;
mod match_literals;
mod request;
mod status;
mod view;

pub use constants::{
    AlpacaApi, ApiGroup, DeviceMethod, DeviceType, HttpHeader, HttpMethod, ManagementMethod,
    Parameter, SensorName,
};
pub use decoder::{RequestDecoder, MAX_PAYLOAD_SIZE};
pub use listener::RequestDecoderListener;
pub use request::{
    AlpacaRequest, RESET_CLIENT_ID, RESET_CLIENT_TRANSACTION_ID, RESET_DEVICE_NUMBER,
};
pub use status::{DecodeStatus, RequestDecoderStatus};
pub use view::ByteView;
