//! Alpaca リクエストの接続ドライバー
//!
//! tokio のストリームから固定長バッファへ読み取り、Sans I/O の
//! [`RequestDecoder`] を駆動する。デコーダーの呼び出し規約
//! (`buffer_is_full` / `at_end_of_input` の報告、未消費バイトの保持)
//! はすべてここが引き受ける。
//!
//! Keep-Alive はサポートしない。1 接続につき 1 リクエストをデコード
//! したら、呼び出し側がレスポンスを書いて接続を閉じる。

use std::time::Duration;

use alpaca_http11::{ByteView, DecodeStatus, RequestDecoder};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{Error, Result};

/// 読み取りバッファのサイズ
///
/// デコーダーの窓の上限と同じ。1 回の `decode()` に渡す窓がこれを
/// 超えることはない。
pub const READ_BUFFER_SIZE: usize = ByteView::MAX_SIZE;

/// 1 接続から 1 リクエストを読み取るドライバー
#[derive(Debug, Clone)]
pub struct Connection {
    read_timeout: Duration,
}

impl Connection {
    /// デフォルト設定 (読み取りタイムアウト 5 秒) のドライバーを作成
    pub fn new() -> Self {
        Self {
            read_timeout: Duration::from_secs(5),
        }
    }

    /// 読み取りタイムアウトを設定
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// ストリームから 1 リクエストを読み取ってデコードする
    ///
    /// デコーダーは内部で `reset()` される。終端ステータス (`HttpOk`
    /// またはエラーステータス) を返したら、記述子は
    /// `decoder.request()` で観察できる。ヘッダーの途中で接続が
    /// 閉じられた場合は [`Error::ConnectionClosed`]。
    pub async fn read_request<R>(
        &self,
        reader: &mut R,
        decoder: &mut RequestDecoder<'_>,
    ) -> Result<DecodeStatus>
    where
        R: AsyncRead + Unpin,
    {
        decoder.reset();

        let mut buf = [0u8; READ_BUFFER_SIZE];
        let mut len = 0;
        let mut eof = false;

        loop {
            if !eof && len < buf.len() {
                let n =
                    tokio::time::timeout(self.read_timeout, reader.read(&mut buf[len..])).await??;
                if n == 0 {
                    eof = true;
                } else {
                    len += n;
                }
            }

            let mut view = ByteView::new(&buf[..len]);
            let buffer_is_full = len == buf.len();
            let status = decoder.decode(&mut view, buffer_is_full, eof);
            let remaining = view.len();
            let consumed = len - remaining;

            // 未消費のバイトをバッファ先頭へ詰め直す
            buf.copy_within(consumed..len, 0);
            len = remaining;

            match status {
                DecodeStatus::NeedMoreInput => {
                    if eof && consumed == 0 {
                        return Err(Error::ConnectionClosed);
                    }
                }
                status => return Ok(status),
            }
        }
    }
}

impl Default for Connection {
    fn default() -> Self {
        Self::new()
    }
}

/// デコード結果に対応するステータスラインを書き込む
///
/// レスポンスボディの生成 (ASCOM の JSON 応答など) は呼び出し側の
/// 責務。エラーステータスを即座に返して接続を閉じる用途を想定する。
pub async fn write_status_line<W>(writer: &mut W, status: DecodeStatus) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    debug_assert!(status.is_terminal());
    let line = format!(
        "HTTP/1.1 {} {}\r\n\r\n",
        status.code(),
        status.reason_phrase()
    );
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alpaca_http11::{DeviceMethod, DeviceType, HttpMethod};

    #[tokio::test]
    async fn read_request_decodes_get() {
        let mut reader: &[u8] = b"GET /api/v1/safetymonitor/0/issafe HTTP/1.1\r\n\r\n";
        let mut decoder = RequestDecoder::new();
        let status = Connection::new()
            .read_request(&mut reader, &mut decoder)
            .await
            .unwrap();

        assert_eq!(status, DecodeStatus::HttpOk);
        let request = decoder.request();
        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.device_type, DeviceType::SafetyMonitor);
        assert_eq!(request.device_method, DeviceMethod::IsSafe);
    }

    #[tokio::test]
    async fn read_request_decodes_put_with_body() {
        let body = "ClientID=7&State=true&Id=3";
        let request_text = format!(
            "PUT /api/v1/switch/2/setswitch HTTP/1.1\r\n\
Content-Type: application/x-www-form-urlencoded\r\n\
Content-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );
        let mut reader: &[u8] = request_text.as_bytes();
        let mut decoder = RequestDecoder::new();
        let status = Connection::new()
            .read_request(&mut reader, &mut decoder)
            .await
            .unwrap();

        assert_eq!(status, DecodeStatus::HttpOk);
        let request = decoder.request();
        assert_eq!(request.device_number, 2);
        assert_eq!(request.device_method, DeviceMethod::SetSwitch);
        assert_eq!(request.client_id, 7);
        assert!(request.have_state && request.state);
        assert_eq!(request.id, 3);
    }

    #[tokio::test]
    async fn read_request_reports_route_errors() {
        let mut reader: &[u8] = b"GET /api/v1/teleporter/0/name HTTP/1.1\r\n\r\n";
        let mut decoder = RequestDecoder::new();
        let status = Connection::new()
            .read_request(&mut reader, &mut decoder)
            .await
            .unwrap();
        assert_eq!(status, DecodeStatus::HttpNotFound);
    }

    #[tokio::test]
    async fn read_request_handles_chunked_arrival() {
        let (client, mut server) = tokio::io::duplex(16);
        let request_text = b"GET /management/apiversions HTTP/1.1\r\n\r\n";

        let writer = tokio::spawn(async move {
            let mut client = client;
            for chunk in request_text.chunks(7) {
                client.write_all(chunk).await.unwrap();
            }
            drop(client);
        });

        let mut decoder = RequestDecoder::new();
        let status = Connection::new()
            .read_request(&mut server, &mut decoder)
            .await
            .unwrap();
        writer.await.unwrap();

        assert_eq!(status, DecodeStatus::HttpOk);
        assert_eq!(
            decoder.request().api,
            alpaca_http11::AlpacaApi::ManagementApiVersions
        );
    }

    #[tokio::test]
    async fn read_request_truncated_headers_is_connection_closed() {
        let mut reader: &[u8] = b"GET /api/v1/safety";
        let mut decoder = RequestDecoder::new();
        let result = Connection::new()
            .read_request(&mut reader, &mut decoder)
            .await;
        assert!(matches!(result, Err(Error::ConnectionClosed)));
    }

    #[tokio::test]
    async fn write_status_line_formats_status() {
        let mut out = std::io::Cursor::new(Vec::new());
        write_status_line(&mut out, DecodeStatus::HttpNotFound)
            .await
            .unwrap();
        assert_eq!(out.get_ref().as_slice(), b"HTTP/1.1 404 Not Found\r\n\r\n");

        let mut out = std::io::Cursor::new(Vec::new());
        write_status_line(&mut out, DecodeStatus::HttpOk).await.unwrap();
        assert_eq!(out.get_ref().as_slice(), b"HTTP/1.1 200 OK\r\n\r\n");
    }
}
