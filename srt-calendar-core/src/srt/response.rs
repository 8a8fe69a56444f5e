//! JSON shapes returned by the SRT mobile API.
//!
//! SRT answers every call with HTTP 200; success or failure lives in
//! `resultMap[0].strResult`. Numbers are sent as strings.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{SrtCalError, SrtCalResult};
use crate::reservation::{Reservation, Ticket};

use super::stations::{station_name, train_name};

const RESULT_SUCCESS: &str = "SUCC";

/// Substrings SRT puts in the login body when credentials are rejected.
const LOGIN_FAILURES: &[(&str, &str)] = &[
    ("존재하지않는 회원입니다", "unknown member id"),
    ("비밀번호 오류", "wrong password"),
    ("Your IP Address Blocked", "IP address blocked by SRT"),
];

#[derive(Debug, Deserialize)]
pub struct ResultMap {
    #[serde(rename = "strResult", default)]
    pub str_result: String,
    #[serde(rename = "msgTxt", default)]
    pub msg_txt: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<T> {
    #[serde(default)]
    result_map: Vec<ResultMap>,
    #[serde(rename = "ErrorMsg", default)]
    error_msg: Option<String>,
    #[serde(flatten)]
    body: T,
}

#[derive(Debug, Deserialize)]
pub struct UserMap {
    #[serde(rename = "MB_CRD_NO", default)]
    pub membership_number: String,
    #[serde(rename = "CUST_NM", default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginBody {
    user_map: Option<UserMap>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationList {
    #[serde(default)]
    pub train_list_map: Vec<TrainRow>,
    #[serde(default)]
    pub pay_list_map: Vec<PayRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketList {
    #[serde(default)]
    pub train_list_map: Vec<TicketRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainRow {
    pub pnr_no: String,
    #[serde(default)]
    pub rcvd_amt: String,
    #[serde(default)]
    pub tk_spec_num: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayRow {
    #[serde(default)]
    pub stlb_trn_clsf_cd: String,
    pub trn_no: String,
    pub dpt_dt: String,
    pub dpt_tm: String,
    pub dpt_rs_stn_cd: String,
    pub arv_tm: String,
    pub arv_rs_stn_cd: String,
    #[serde(default)]
    pub ise_lmt_dt: String,
    #[serde(default)]
    pub ise_lmt_tm: String,
    #[serde(default)]
    pub stl_flg: String,
}

impl PayRow {
    pub fn is_paid(&self) -> bool {
        self.stl_flg == "Y"
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRow {
    pub scar_no: String,
    #[serde(default)]
    pub seat_no: String,
    #[serde(default)]
    pub psrm_cl_cd: String,
    #[serde(default)]
    pub psg_tp_cd: String,
    #[serde(default)]
    pub rcvd_amt: String,
    #[serde(default)]
    pub stdr_prc: String,
    #[serde(default)]
    pub dcnt_prc: String,
}

/// Parse a data response and check its result map.
pub fn parse_response<T: DeserializeOwned>(text: &str) -> SrtCalResult<T> {
    let envelope: Envelope<T> = serde_json::from_str(text)
        .map_err(|e| SrtCalError::RemoteService(format!("unexpected response from SRT: {e}")))?;

    match envelope.result_map.first() {
        Some(status) if status.str_result == RESULT_SUCCESS => Ok(envelope.body),
        Some(status) => Err(SrtCalError::RemoteService(status.msg_txt.clone())),
        None => Err(SrtCalError::RemoteService(
            envelope
                .error_msg
                .unwrap_or_else(|| "response has no result".to_string()),
        )),
    }
}

/// Check a login response body and extract the logged-in user.
pub fn parse_login(text: &str) -> SrtCalResult<UserMap> {
    if let Some((_, reason)) = LOGIN_FAILURES.iter().find(|(needle, _)| text.contains(needle)) {
        return Err(SrtCalError::Authentication((*reason).to_string()));
    }

    let body: LoginBody = serde_json::from_str(text)
        .map_err(|e| SrtCalError::RemoteService(format!("unexpected login response: {e}")))?;

    body.user_map
        .ok_or_else(|| SrtCalError::Authentication("login response has no user".to_string()))
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Ticket {
            car: row.scar_no,
            seat: non_empty(row.seat_no),
            seat_type_code: non_empty(row.psrm_cl_cd),
            passenger_type_code: non_empty(row.psg_tp_cd),
            price: row.rcvd_amt.trim().parse().ok(),
            original_price: row.stdr_prc.trim().parse().ok(),
            discount: row.dcnt_prc.trim().parse().ok(),
        }
    }
}

/// Pair each `trainListMap` row with its `payListMap` sibling, dropping unpaid
/// reservations when `paid_only` is set.
pub fn paired_rows(list: ReservationList, paid_only: bool) -> Vec<(TrainRow, PayRow)> {
    let (trains, payments) = (list.train_list_map.len(), list.pay_list_map.len());
    if trains != payments {
        tracing::warn!(
            trains,
            payments,
            "SRT reservation lists differ in length, unmatched rows are ignored"
        );
    }

    list.train_list_map
        .into_iter()
        .zip(list.pay_list_map)
        .filter(|(train, pay)| {
            let keep = !paid_only || pay.is_paid();
            if !keep {
                tracing::debug!(pnr = %train.pnr_no, "skipping unpaid reservation");
            }
            keep
        })
        .collect()
}

/// Combine one row of `trainListMap` with its `payListMap` sibling.
pub fn to_reservation(train: TrainRow, pay: PayRow, tickets: Vec<Ticket>) -> Reservation {
    Reservation {
        reservation_number: non_empty(train.pnr_no),
        total_cost: train.rcvd_amt.trim().parse().ok(),
        seat_count: train.tk_spec_num.trim().parse().ok(),
        train_name: train_name(&pay.stlb_trn_clsf_cd).map(str::to_string),
        paid: Some(pay.is_paid()),
        dep_station_name: station_name(&pay.dpt_rs_stn_cd),
        arr_station_name: station_name(&pay.arv_rs_stn_cd),
        train_code: non_empty(pay.stlb_trn_clsf_cd),
        train_number: pay.trn_no,
        dep_date: pay.dpt_dt,
        dep_time: pay.dpt_tm,
        dep_station_code: non_empty(pay.dpt_rs_stn_cd),
        arr_time: pay.arv_tm,
        arr_station_code: non_empty(pay.arv_rs_stn_cd),
        payment_date: non_empty(pay.ise_lmt_dt),
        payment_time: non_empty(pay.ise_lmt_tm),
        tickets,
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
