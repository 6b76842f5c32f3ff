//! tokio_alpaca - Tokio integration for alpaca-http11
//!
//! Sans I/O の [`alpaca_http11`] デコーダーを tokio のストリームで
//! 駆動するための薄いアダプター。
//!
//! ## 特徴
//!
//! - **alpaca_http11 ベース**: デコードロジックはすべて Sans I/O 側
//! - **固定長バッファ**: 接続ごとに 255 バイトの読み取りバッファのみ
//! - **1 接続 1 リクエスト**: Keep-Alive なし
//!
//! ## 使い方
//!
//! ```ignore
//! use alpaca_http11::{DecodeStatus, RequestDecoder};
//! use tokio_alpaca::{Connection, write_status_line};
//!
//! let (mut stream, _) = listener.accept().await?;
//! let mut decoder = RequestDecoder::new();
//! match Connection::new().read_request(&mut stream, &mut decoder).await? {
//!     DecodeStatus::HttpOk => {
//!         // decoder.request() をデバイス処理へ引き渡し、応答を書く
//!     }
//!     status => {
//!         // デコード失敗。ステータスラインだけ返して接続を閉じる
//!         write_status_line(&mut stream, status).await?;
//!     }
//! }
//! ```

pub mod error;
pub mod server;

pub use error::{Error, Result};
pub use server::{write_status_line, Connection, READ_BUFFER_SIZE};

// alpaca_http11 の型を re-export
pub use alpaca_http11::{AlpacaRequest, DecodeStatus, RequestDecoder};
