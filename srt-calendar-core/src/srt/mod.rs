//! Live reservations from an SRT account.

mod client;
mod response;
mod stations;

use std::fmt;
use std::time::Duration;

pub use client::{DEFAULT_BASE_URL, LoginType, SrtClient};
pub use stations::{station_name, train_name};

use crate::error::SrtCalResult;
use crate::reservation::Reservation;
use crate::source::ReservationSource;

/// SRT login: membership number, e-mail or phone number, plus password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub id: String,
    pub password: String,
}

impl Credentials {
    pub fn new(id: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            id: id.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("id", &self.id)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SrtOptions {
    pub base_url: String,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Skip reservations that have not been paid yet.
    pub paid_only: bool,
}

impl Default for SrtOptions {
    fn default() -> Self {
        SrtOptions {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(Duration::from_secs(30)),
            paid_only: false,
        }
    }
}

/// Logs in, lists reservations, logs out.
#[derive(Debug, Clone)]
pub struct SrtSource {
    credentials: Credentials,
    options: SrtOptions,
}

impl SrtSource {
    pub fn new(credentials: Credentials, options: SrtOptions) -> Self {
        SrtSource {
            credentials,
            options,
        }
    }
}

impl ReservationSource for SrtSource {
    async fn reservations(&self) -> SrtCalResult<Vec<Reservation>> {
        tracing::info!("Fetching booked trains from SRT");

        let mut client = SrtClient::new(&self.options.base_url, self.options.timeout)?;
        client.login(&self.credentials).await?;

        let reservations = client.reservations(self.options.paid_only).await;

        if let Err(e) = client.logout().await {
            tracing::warn!("SRT logout failed: {}", e);
        }

        reservations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SrtCalError;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    const LOGIN: &str = "/apb/selectListApb01080_n.do";
    const LIST: &str = "/atc/selectListAtc14016_n.do";
    const TICKETS: &str = "/ard/selectListArd02019_n.do";
    const LOGOUT: &str = "/login/loginOut.do";

    const LOGIN_JSON: &str = r#"{"userMap": {"MB_CRD_NO": "1234567890", "CUST_NM": "홍길동"}}"#;

    const LIST_JSON: &str = r#"{
        "resultMap": [{"strResult": "SUCC"}],
        "trainListMap": [{"pnrNo": "100"}, {"pnrNo": "200"}],
        "payListMap": [
            {"stlbTrnClsfCd": "17", "trnNo": "00381", "dptDt": "20240115", "dptTm": "093000",
             "dptRsStnCd": "0551", "arvTm": "115500", "arvRsStnCd": "0020", "stlFlg": "Y"},
            {"stlbTrnClsfCd": "17", "trnNo": "00305", "dptDt": "20240120", "dptTm": "180000",
             "dptRsStnCd": "0020", "arvTm": "203000", "arvRsStnCd": "0551", "stlFlg": "N"}
        ]
    }"#;

    const TICKETS_JSON: &str = r#"{
        "resultMap": [{"strResult": "SUCC"}],
        "trainListMap": [{"scarNo": "3", "seatNo": "12A"}, {"scarNo": "3", "seatNo": ""}]
    }"#;

    type RequestLog = Arc<Mutex<Vec<(String, String)>>>;

    fn srt_reply(path: &str) -> String {
        match path {
            LOGIN => LOGIN_JSON,
            LIST => LIST_JSON,
            TICKETS => TICKETS_JSON,
            _ => "{}",
        }
        .to_string()
    }

    fn failing_tickets_reply(path: &str) -> String {
        match path {
            TICKETS => r#"{"resultMap": [{"strResult": "FAIL", "msgTxt": "조회 실패"}]}"#.to_string(),
            _ => srt_reply(path),
        }
    }

    /// Serve one HTTP request per connection, recording `(path, body)`.
    async fn spawn_srt(respond: fn(&str) -> String) -> (String, RequestLog) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let log: RequestLog = Arc::default();
        let seen = log.clone();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                handle(stream, respond, &seen).await;
            }
        });

        (base_url, log)
    }

    async fn handle(mut stream: TcpStream, respond: fn(&str) -> String, log: &RequestLog) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let head_end = loop {
            let n = stream.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
        let content_length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);

        while buf.len() < head_end + content_length {
            let n = stream.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        let path = head.split_whitespace().nth(1).unwrap_or_default().to_string();
        let body = String::from_utf8_lossy(&buf[head_end..]).to_string();
        let reply = respond(&path);
        log.lock().unwrap().push((path, body));

        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json; charset=utf-8\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{}",
            reply.len(),
            reply
        );
        let _ = stream.write_all(response.as_bytes()).await;
        let _ = stream.shutdown().await;
    }

    fn live_source(base_url: String, paid_only: bool) -> SrtSource {
        let options = SrtOptions {
            base_url,
            timeout: Some(Duration::from_secs(5)),
            paid_only,
        };
        SrtSource::new(Credentials::new("user@example.com", "pw"), options)
    }

    fn paths(log: &RequestLog) -> Vec<String> {
        log.lock().unwrap().iter().map(|(path, _)| path.clone()).collect()
    }

    #[tokio::test]
    async fn test_live_source_fetches_tickets_per_reservation() {
        let (base_url, log) = spawn_srt(srt_reply).await;

        let reservations = live_source(base_url, false).reservations().await.unwrap();

        assert_eq!(paths(&log), [LOGIN, LIST, TICKETS, TICKETS, LOGOUT]);
        assert_eq!(reservations.len(), 2);
        assert_eq!(reservations[0].reservation_number.as_deref(), Some("100"));
        assert_eq!(reservations[0].dep_station_name, "수서");
        assert_eq!(reservations[0].seat_summary().as_deref(), Some("3-12A"));
        assert_eq!(reservations[1].paid, Some(false));

        let requests = log.lock().unwrap();
        assert!(requests[0].1.contains("srchDvCd=2"), "login form: {}", requests[0].1);
        assert!(requests[2].1.contains("pnrNo=100"), "ticket form: {}", requests[2].1);
        assert!(requests[2].1.contains("jrnySqno=1"), "ticket form: {}", requests[2].1);
        assert!(requests[3].1.contains("pnrNo=200"), "ticket form: {}", requests[3].1);
    }

    #[tokio::test]
    async fn test_live_source_paid_only_skips_unpaid() {
        let (base_url, log) = spawn_srt(srt_reply).await;

        let reservations = live_source(base_url, true).reservations().await.unwrap();

        assert_eq!(reservations.len(), 1);
        assert_eq!(reservations[0].paid, Some(true));
        assert_eq!(paths(&log), [LOGIN, LIST, TICKETS, LOGOUT]);
        assert!(log.lock().unwrap()[2].1.contains("pnrNo=100"));
    }

    #[tokio::test]
    async fn test_live_source_logs_out_when_listing_fails() {
        let (base_url, log) = spawn_srt(failing_tickets_reply).await;

        let result = live_source(base_url, false).reservations().await;

        match result {
            Err(SrtCalError::RemoteService(msg)) => assert_eq!(msg, "조회 실패"),
            other => panic!("expected remote error, got {:?}", other),
        }
        assert_eq!(paths(&log), [LOGIN, LIST, TICKETS, LOGOUT]);
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = Credentials::new("user@example.com", "hunter2");
        let debug = format!("{:?}", credentials);

        assert!(debug.contains("user@example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_default_options() {
        let options = SrtOptions::default();
        assert_eq!(options.base_url, DEFAULT_BASE_URL);
        assert_eq!(options.timeout, Some(Duration::from_secs(30)));
        assert!(!options.paid_only);
    }
}
