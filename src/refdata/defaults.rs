//! Built-in reference collections.
//!
//! These tables are served verbatim whenever the store is empty or
//! unreachable, and are also what `init --seed` writes into a fresh database.
//! Clients depend on the exact values, so changes here are API changes.

use super::models::{ReferenceItem, ReferenceKind};

struct BuiltinRow {
    id: i64,
    name: &'static str,
    label: &'static str,
    thai_label: &'static str,
    description: &'static str,
    thai_description: &'static str,
    color: Option<&'static str>,
}

const STATUSES: &[BuiltinRow] = &[
    BuiltinRow {
        id: 1,
        name: "OPEN",
        label: "접수",
        thai_label: "เปิด",
        description: "새로 등록된 이슈",
        thai_description: "ปัญหาที่เพิ่งแจ้งเข้ามา",
        color: Some("#3B82F6"),
    },
    BuiltinRow {
        id: 2,
        name: "IN_PROGRESS",
        label: "처리중",
        thai_label: "กำลังดำเนินการ",
        description: "담당자가 처리 중인 이슈",
        thai_description: "ผู้รับผิดชอบกำลังดำเนินการ",
        color: Some("#F59E0B"),
    },
    BuiltinRow {
        id: 3,
        name: "RESOLVED",
        label: "해결됨",
        thai_label: "แก้ไขแล้ว",
        description: "조치가 완료되어 확인 대기 중",
        thai_description: "แก้ไขเสร็จแล้ว รอการยืนยัน",
        color: Some("#10B981"),
    },
    BuiltinRow {
        id: 4,
        name: "CLOSED",
        label: "종료",
        thai_label: "ปิด",
        description: "확인 후 종료된 이슈",
        thai_description: "ตรวจสอบแล้วและปิดงาน",
        color: Some("#6B7280"),
    },
];

const PRIORITIES: &[BuiltinRow] = &[
    BuiltinRow {
        id: 1,
        name: "CRITICAL",
        label: "긴급",
        thai_label: "วิกฤต",
        description: "생산 중단, 즉시 대응 필요",
        thai_description: "การผลิตหยุด ต้องแก้ไขทันที",
        color: Some("#DC2626"),
    },
    BuiltinRow {
        id: 2,
        name: "HIGH",
        label: "높음",
        thai_label: "สูง",
        description: "당일 내 대응 필요",
        thai_description: "ต้องแก้ไขภายในวันนี้",
        color: Some("#F97316"),
    },
    BuiltinRow {
        id: 3,
        name: "MEDIUM",
        label: "보통",
        thai_label: "ปานกลาง",
        description: "일정에 따라 처리",
        thai_description: "ดำเนินการตามกำหนดการ",
        color: Some("#EAB308"),
    },
    BuiltinRow {
        id: 4,
        name: "LOW",
        label: "낮음",
        thai_label: "ต่ำ",
        description: "여유가 있을 때 처리",
        thai_description: "ดำเนินการเมื่อมีเวลา",
        color: Some("#22C55E"),
    },
];

const CATEGORIES: &[BuiltinRow] = &[
    BuiltinRow {
        id: 1,
        name: "facility",
        label: "설비",
        thai_label: "อุปกรณ์และสิ่งอำนวยความสะดวก",
        description: "설비 고장 및 유지보수",
        thai_description: "อุปกรณ์ชำรุดและการบำรุงรักษา",
        color: None,
    },
    BuiltinRow {
        id: 2,
        name: "quality",
        label: "품질",
        thai_label: "คุณภาพ",
        description: "불량 및 품질 이상",
        thai_description: "ของเสียและปัญหาคุณภาพ",
        color: None,
    },
    BuiltinRow {
        id: 3,
        name: "safety",
        label: "안전",
        thai_label: "ความปลอดภัย",
        description: "안전 사고 및 위험 요소",
        thai_description: "อุบัติเหตุและความเสี่ยงด้านความปลอดภัย",
        color: None,
    },
    BuiltinRow {
        id: 4,
        name: "production",
        label: "생산",
        thai_label: "การผลิต",
        description: "생산 계획 및 공정 문제",
        thai_description: "ปัญหาแผนการผลิตและกระบวนการ",
        color: None,
    },
    BuiltinRow {
        id: 5,
        name: "other",
        label: "기타",
        thai_label: "อื่นๆ",
        description: "기타 문의",
        thai_description: "เรื่องอื่นๆ",
        color: None,
    },
];

const DEPARTMENTS: &[BuiltinRow] = &[
    BuiltinRow {
        id: 1,
        name: "production",
        label: "생산부",
        thai_label: "ฝ่ายผลิต",
        description: "생산 라인 운영",
        thai_description: "ดูแลสายการผลิต",
        color: None,
    },
    BuiltinRow {
        id: 2,
        name: "quality",
        label: "품질관리부",
        thai_label: "ฝ่ายควบคุมคุณภาพ",
        description: "품질 검사 및 관리",
        thai_description: "ตรวจสอบและควบคุมคุณภาพ",
        color: None,
    },
    BuiltinRow {
        id: 3,
        name: "maintenance",
        label: "설비보전부",
        thai_label: "ฝ่ายซ่อมบำรุง",
        description: "설비 점검 및 수리",
        thai_description: "ตรวจสอบและซ่อมแซมเครื่องจักร",
        color: None,
    },
    BuiltinRow {
        id: 4,
        name: "logistics",
        label: "물류부",
        thai_label: "ฝ่ายโลจิสติกส์",
        description: "자재 입출고 및 배송",
        thai_description: "รับจ่ายวัตถุดิบและจัดส่ง",
        color: None,
    },
    BuiltinRow {
        id: 5,
        name: "administration",
        label: "관리부",
        thai_label: "ฝ่ายบริหาร",
        description: "인사 및 총무",
        thai_description: "บุคคลและธุรการ",
        color: None,
    },
];

fn rows_for(kind: ReferenceKind) -> &'static [BuiltinRow] {
    match kind {
        ReferenceKind::Department => DEPARTMENTS,
        ReferenceKind::Category => CATEGORIES,
        ReferenceKind::Priority => PRIORITIES,
        ReferenceKind::Status => STATUSES,
    }
}

/// The built-in collection for `kind`, ascending by `id`.
pub fn builtin(kind: ReferenceKind) -> Vec<ReferenceItem> {
    rows_for(kind)
        .iter()
        .map(|row| ReferenceItem {
            id: row.id,
            name: row.name.to_string(),
            label: row.label.to_string(),
            thai_label: Some(row.thai_label.to_string()),
            description: Some(row.description.to_string()),
            thai_description: Some(row.thai_description.to_string()),
            color: row.color.map(str::to_string),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(kind: ReferenceKind) -> Vec<String> {
        builtin(kind).into_iter().map(|r| r.name).collect()
    }

    #[test]
    fn status_defaults_in_order() {
        assert_eq!(names(ReferenceKind::Status), ["OPEN", "IN_PROGRESS", "RESOLVED", "CLOSED"]);
    }

    #[test]
    fn priority_defaults_in_order() {
        assert_eq!(names(ReferenceKind::Priority), ["CRITICAL", "HIGH", "MEDIUM", "LOW"]);
    }

    #[test]
    fn every_kind_is_non_empty_ascending_and_unique() {
        for kind in ReferenceKind::ALL {
            let rows = builtin(kind);
            assert!(!rows.is_empty(), "{} defaults empty", kind);
            assert!(rows.windows(2).all(|w| w[0].id < w[1].id), "{} not ascending", kind);

            let mut seen = std::collections::HashSet::new();
            assert!(rows.iter().all(|r| seen.insert(r.name.clone())), "{} has duplicate names", kind);
        }
    }

    #[test]
    fn color_present_only_where_kind_has_color() {
        for kind in ReferenceKind::ALL {
            for row in builtin(kind) {
                assert_eq!(row.color.is_some(), kind.has_color(), "{} row {}", kind, row.name);
            }
        }
    }
}
