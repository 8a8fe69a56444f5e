//! HTTP client for the SRT mobile API.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

use crate::error::{SrtCalError, SrtCalResult};
use crate::reservation::{Reservation, Ticket};

use super::Credentials;
use super::response::{self, ReservationList, TicketList};

pub const DEFAULT_BASE_URL: &str = "https://app.srail.or.kr:443";

const MAIN_PATH: &str = "/main/main.do";
const LOGIN_PATH: &str = "/apb/selectListApb01080_n.do";
const LOGOUT_PATH: &str = "/login/loginOut.do";
const RESERVATIONS_PATH: &str = "/atc/selectListAtc14016_n.do";
const TICKET_INFO_PATH: &str = "/ard/selectListArd02019_n.do";

const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 5.1.1; LGM-V300K Build/N2G47H) \
    AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/39.0.0.0 Mobile Safari/537.36\
    SRT-APP-Android V.1.0.6";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+").expect("Invalid email regex"));

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{3})-(\d{3,4})-(\d{4})").expect("Invalid phone regex"));

/// How the login identifier should be interpreted by SRT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginType {
    MembershipNumber,
    Email,
    Phone,
}

impl LoginType {
    pub fn detect(id: &str) -> Self {
        if EMAIL_REGEX.is_match(id) {
            LoginType::Email
        } else if PHONE_REGEX.is_match(id) {
            LoginType::Phone
        } else {
            LoginType::MembershipNumber
        }
    }

    fn code(self) -> &'static str {
        match self {
            LoginType::MembershipNumber => "1",
            LoginType::Email => "2",
            LoginType::Phone => "3",
        }
    }

    /// SRT expects phone numbers without dashes.
    fn normalize(self, id: &str) -> String {
        match self {
            LoginType::Phone => id.replace('-', ""),
            _ => id.to_string(),
        }
    }
}

/// A cookie-backed session against the SRT mobile API.
pub struct SrtClient {
    http: reqwest::Client,
    base_url: String,
    logged_in: bool,
}

impl SrtClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> SrtCalResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(MOBILE_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(SrtClient {
            http: builder.build()?,
            base_url: base_url.into(),
            logged_in: false,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post(&self, path: &str, form: &[(&str, &str)]) -> SrtCalResult<String> {
        let response = self.http.post(self.url(path)).form(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SrtCalError::RemoteService(format!(
                "{} returned HTTP {}",
                path, status
            )));
        }

        Ok(response.text().await?)
    }

    pub async fn login(&mut self, credentials: &Credentials) -> SrtCalResult<()> {
        let login_type = LoginType::detect(&credentials.id);
        let id = login_type.normalize(&credentials.id);
        let referer = self.url(MAIN_PATH);

        let form = [
            ("auto", "Y"),
            ("check", "Y"),
            ("page", "menu"),
            ("deviceKey", "-"),
            ("customerYn", ""),
            ("login_referer", referer.as_str()),
            ("srchDvCd", login_type.code()),
            ("srchDvNm", id.as_str()),
            ("hmpgPwdCphd", credentials.password.as_str()),
        ];

        let body = self.post(LOGIN_PATH, &form).await?;
        let user = response::parse_login(&body)?;

        tracing::info!(membership = %user.membership_number, "Logged in to SRT as {}", user.name);
        self.logged_in = true;

        Ok(())
    }

    pub async fn logout(&mut self) -> SrtCalResult<()> {
        if !self.logged_in {
            return Ok(());
        }

        self.post(LOGOUT_PATH, &[]).await?;
        self.logged_in = false;

        Ok(())
    }

    /// All reservations in the account, with per-ticket seat details.
    pub async fn reservations(&self, paid_only: bool) -> SrtCalResult<Vec<Reservation>> {
        if !self.logged_in {
            return Err(SrtCalError::Authentication("not logged in".to_string()));
        }

        let body = self.post(RESERVATIONS_PATH, &[("pageNo", "0")]).await?;
        let list: ReservationList = response::parse_response(&body)?;
        tracing::debug!(count = list.train_list_map.len(), "fetched reservation list");

        let rows = response::paired_rows(list, paid_only);
        let mut reservations = Vec::with_capacity(rows.len());

        for (train, pay) in rows {
            let tickets = self.ticket_info(&train.pnr_no).await?;
            reservations.push(response::to_reservation(train, pay, tickets));
        }

        Ok(reservations)
    }

    pub async fn ticket_info(&self, reservation_number: &str) -> SrtCalResult<Vec<Ticket>> {
        let form = [("pnrNo", reservation_number), ("jrnySqno", "1")];

        let body = self.post(TICKET_INFO_PATH, &form).await?;
        let list: TicketList = response::parse_response(&body)?;

        Ok(list.train_list_map.into_iter().map(Ticket::from).collect())
    }
}
