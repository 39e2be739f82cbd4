use std::io::Error;
use std::path::Path;

pub const HEADER: [&str; 7] = [
    "action",
    "firstname",
    "lastname",
    "email",
    "external_id",
    "credential",
    "candidate",
];

pub fn register_row(n: usize) -> [String; 7] {
    [
        "register".to_string(),
        format!("first{n}"),
        format!("last{n}"),
        format!("v{n}@x.edu"),
        format!("H{n:04}"),
        String::new(),
        String::new(),
    ]
}

pub fn vote_row(credential: &str, candidate: &str) -> [String; 7] {
    [
        "vote".to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        credential.to_string(),
        candidate.to_string(),
    ]
}

/// Writes a request CSV with the given rows, header included.
pub fn write_requests(path: &Path, rows: &[[String; 7]]) -> Result<(), Error> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(HEADER)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}
