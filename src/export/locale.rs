//! Locale-aware rendering of dates and the bilingual template strings.

use crate::models::Language;
use crate::utils::date::parse_iso_date;
use chrono::{Datelike, NaiveDate};

/// Offset between the Buddhist Era and the Gregorian year.
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

const TH_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Short numeric date for table cells.
///
/// - `th`: `dd/MM/yyyy` with a Buddhist Era year (`2024-03-05` → `05/03/2567`)
/// - `en`: `MM/dd/yyyy` (`2024-03-05` → `03/05/2024`)
///
/// Input that is not a date is returned unchanged.
pub fn format_date(iso: &str, language: Language) -> String {
    match parse_iso_date(iso) {
        Some(d) => format_naive(d, language),
        None => iso.to_string(),
    }
}

fn format_naive(d: NaiveDate, language: Language) -> String {
    match language {
        Language::Th => format!(
            "{:02}/{:02}/{}",
            d.day(),
            d.month(),
            d.year() + BUDDHIST_ERA_OFFSET
        ),
        Language::En => format!("{:02}/{:02}/{}", d.month(), d.day(), d.year()),
    }
}

/// Long form with month names: `5 มีนาคม 2567` / `March 5, 2024`.
pub fn format_date_long(iso: &str, language: Language) -> String {
    let Some(d) = parse_iso_date(iso) else {
        return iso.to_string();
    };

    let month = d.month0() as usize;
    match language {
        Language::Th => format!(
            "{} {} {}",
            d.day(),
            TH_MONTHS[month],
            d.year() + BUDDHIST_ERA_OFFSET
        ),
        Language::En => format!("{} {}, {}", EN_MONTHS[month], d.day(), d.year()),
    }
}

/// Every fixed string printed on a report, in one language.
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub title: &'static str,
    pub sequence_prefix: &'static str,
    pub name: &'static str,
    pub student_id: &'static str,
    pub institution: &'static str,
    pub column_date: &'static str,
    pub column_hours: &'static str,
    pub column_description: &'static str,
    pub column_signature: &'static str,
    pub this_report: [&'static str; 2],
    pub previous_reports: [&'static str; 2],
    pub current_total: [&'static str; 2],
    pub certification: &'static str,
    pub supervisor_signature: &'static str,
    pub supervisor_title_prefix: &'static str,
    pub date_line: &'static str,
    pub file_prefix: &'static str,
}

const TH_LABELS: Labels = Labels {
    title: "รายงานการฝึกงานทุกสองสัปดาห์",
    sequence_prefix: "ฉบับที่",
    name: "ชื่อ - สกุล",
    student_id: "รหัสนิสิต",
    institution: "ชื่อหน่วยงานที่ฝึกงาน",
    column_date: "วัน/เดือน/ปี",
    column_hours: "จำนวนชม.",
    column_description: "งานที่ปฏิบัติโดยย่อ",
    column_signature: "ลงนาม(นิสิต)",
    this_report: ["จำนวนชม.ฝึกงานทั้งหมด", "ในรายงานฉบับนี้"],
    previous_reports: ["จำนวนชม.ฝึกงานทั้งหมด", "จากรายงานฉบับก่อนหน้า"],
    current_total: ["จำนวนชม.ฝึกงานทั้งหมด", "ในปัจจุบัน"],
    certification: "ขอรับรองว่ารายงานนี้เป็นความจริงทุกประการ",
    supervisor_signature: "ลงชื่อ ................................................................................. วิศวกรผู้ควบคุม",
    supervisor_title_prefix: "ตำแหน่ง",
    date_line: "วันที่ .................................................................................",
    file_prefix: "รายงานฝึกงาน_ฉบับที่",
};

const EN_LABELS: Labels = Labels {
    title: "Internship Bi-weekly Report",
    sequence_prefix: "No.",
    name: "Name - Surname",
    student_id: "Student ID",
    institution: "Internship institution",
    column_date: "Date",
    column_hours: "Hours",
    column_description: "Description",
    column_signature: "Student Signature",
    this_report: ["Total hours", "in this report"],
    previous_reports: ["Total hours", "from previous reports"],
    current_total: ["Current", "total hours"],
    certification: "I certify that this report is truthful.",
    supervisor_signature: "Supervisor signature .................................................................................",
    supervisor_title_prefix: "Title:",
    date_line: "Date .................................................................................",
    file_prefix: "Internship_Report",
};

pub fn labels(language: Language) -> &'static Labels {
    match language {
        Language::Th => &TH_LABELS,
        Language::En => &EN_LABELS,
    }
}
