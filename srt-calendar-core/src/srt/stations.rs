//! SRT station and train-class codes.

/// Station codes used by the SRT mobile API.
const STATIONS: &[(&str, &str)] = &[
    ("0551", "수서"),
    ("0552", "동탄"),
    ("0553", "평택지제"),
    ("0502", "천안아산"),
    ("0297", "오송"),
    ("0010", "대전"),
    ("0507", "김천(구미)"),
    ("0506", "서대구"),
    ("0015", "동대구"),
    ("0508", "경주"),
    ("0509", "울산(통도사)"),
    ("0020", "부산"),
    ("0514", "공주"),
    ("0030", "익산"),
    ("0033", "정읍"),
    ("0036", "광주송정"),
    ("0037", "나주"),
    ("0041", "목포"),
    ("0045", "전주"),
    ("0048", "남원"),
    ("0049", "곡성"),
    ("0050", "구례구"),
    ("0051", "순천"),
    ("0139", "여천"),
    ("0053", "여수EXPO"),
    ("0017", "밀양"),
    ("0056", "진영"),
    ("0512", "창원중앙"),
    ("0057", "창원"),
    ("0059", "마산"),
    ("0063", "진주"),
    ("0515", "포항"),
];

const TRAIN_CLASSES: &[(&str, &str)] = &[
    ("00", "KTX"),
    ("02", "무궁화"),
    ("03", "통근열차"),
    ("04", "누리로"),
    ("07", "KTX-산천"),
    ("08", "ITX-새마을"),
    ("09", "ITX-청춘"),
    ("17", "SRT"),
];

/// Display name for a station code; unknown codes are returned as-is.
pub fn station_name(code: &str) -> String {
    lookup(STATIONS, code).unwrap_or(code).to_string()
}

pub fn train_name(code: &str) -> Option<&'static str> {
    lookup(TRAIN_CLASSES, code)
}

fn lookup(table: &'static [(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table.iter().find(|(c, _)| *c == code).map(|(_, name)| *name)
}
