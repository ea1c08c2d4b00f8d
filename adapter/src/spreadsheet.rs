use kernel::model::attendance::AttendanceExportRow;
use rust_xlsxwriter::Workbook;
use shared::error::AppResult;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const HEADERS: [&str; 9] = [
    "event_id",
    "event_name",
    "event_date",
    "user_id",
    "username",
    "full_name",
    "email",
    "status",
    "registered_at",
];

/// Writes one worksheet with a header line and one line per attendee.
pub fn attendance_workbook(rows: &[AttendanceExportRow]) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("attendance")?;

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let line = i as u32 + 1;
        for (col, value) in cells(row).iter().enumerate() {
            sheet.write_string(line, col as u16, value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn cells(row: &AttendanceExportRow) -> [String; 9] {
    let d = &row.detail;
    [
        d.event_id.to_string(),
        row.event_name.clone(),
        row.event_date.format("%Y-%m-%d").to_string(),
        d.user_id.to_string(),
        d.user_name.clone(),
        d.full_name.clone(),
        d.email.clone(),
        d.status.as_ref().to_string(),
        d.registered_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use kernel::model::{
        attendance::{AttendanceDetail, AttendanceStatus},
        id::{EventId, UserId},
    };

    fn row() -> AttendanceExportRow {
        AttendanceExportRow {
            event_name: "Open day".into(),
            event_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            detail: AttendanceDetail {
                event_id: EventId::new(),
                user_id: UserId::new(),
                user_name: "ana".into(),
                full_name: "Ana Perez".into(),
                email: "ana@example.com".into(),
                status: AttendanceStatus::Attended,
                registered_at: Utc.with_ymd_and_hms(2026, 4, 2, 9, 30, 0).unwrap(),
            },
        }
    }

    #[test]
    fn cells_follow_the_header_order() {
        let r = row();
        let cells = cells(&r);
        assert_eq!(cells[1], "Open day");
        assert_eq!(cells[2], "2026-05-01");
        assert_eq!(cells[4], "ana");
        assert_eq!(cells[7], "Attended");
        assert_eq!(cells[8], "2026-04-02 09:30:00");
    }

    #[test]
    fn workbook_is_a_zip_container() {
        let bytes = attendance_workbook(&[row()]).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
