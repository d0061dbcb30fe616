// Parser for `show ip interface brief`.
//
// Structured branch: a header line starting with `Interface` and holding
// `Status` and `Protocol`, then one row per interface:
//
//   <interface> <ip-address> <ok?> <method> <status...> <protocol>
//
// where <status> is `up`, `down` or `administratively down`.
//
// Raw branch, used when no header is found: any line whose first token
// names a GigabitEthernet port, with the first `up` / `down` /
// `administratively` token after it taken as the status.

use std::fmt;

const GIGABIT_PREFIX: &str = "GigabitEthernet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortStatus {
    Up,
    Down,
    AdminDown,
}

impl PortStatus {
    fn from_status_field(status: &str) -> Option<Self> {
        match status {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "administratively down" => Some(Self::AdminDown),
            _ => None,
        }
    }
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::AdminDown => "administratively down",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortRow {
    pub interface: String,
    pub status: PortStatus,
}

/// Rows for every interface in the output, table or raw.
pub fn parse_brief(output: &str) -> Vec<PortRow> {
    let mut lines = output.lines();
    let has_header = lines.by_ref().any(is_header);
    if has_header {
        lines.filter_map(parse_table_row).collect()
    } else {
        output.lines().filter_map(parse_raw_line).collect()
    }
}

fn is_header(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with("Interface") && line.contains("Status") && line.contains("Protocol")
}

fn parse_table_row(line: &str) -> Option<PortRow> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    // name, ip, ok?, method, status (1-2 words), protocol
    if fields.len() < 6 {
        return None;
    }
    let status = fields.get(4..fields.len() - 1)?.join(" ");
    Some(PortRow {
        interface: (*fields.first()?).to_owned(),
        status: PortStatus::from_status_field(&status)?,
    })
}

fn parse_raw_line(line: &str) -> Option<PortRow> {
    let mut tokens = line.split_whitespace();
    let interface = tokens.next().filter(|t| t.starts_with(GIGABIT_PREFIX))?;
    let status = tokens.find_map(|t| match t.trim_end_matches(|c: char| c.is_ascii_punctuation()) {
        "up" => Some(PortStatus::Up),
        "down" => Some(PortStatus::Down),
        "administratively" => Some(PortStatus::AdminDown),
        _ => None,
    })?;
    Some(PortRow {
        interface: interface.to_owned(),
        status,
    })
}

/// `GigabitEthernet1 up, GigabitEthernet2 down -> 1 up, 1 down, 0 administratively down`
pub fn gigabit_summary(rows: &[PortRow]) -> String {
    let ports: Vec<&PortRow> = rows
        .iter()
        .filter(|r| r.interface.starts_with(GIGABIT_PREFIX))
        .collect();
    let count = |s: PortStatus| ports.iter().filter(|r| r.status == s).count();

    let detail = ports
        .iter()
        .map(|r| format!("{} {}", r.interface, r.status))
        .collect::<Vec<_>>()
        .join(", ");
    let summary = format!(
        "-> {} up, {} down, {} administratively down",
        count(PortStatus::Up),
        count(PortStatus::Down),
        count(PortStatus::AdminDown)
    );

    if detail.is_empty() {
        summary
    } else {
        format!("{detail} {summary}")
    }
}
