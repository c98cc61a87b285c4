//! vCard 3.0 export
//!
//! Only fields present in the projection are written, so a vCard never
//! reveals more than the card it was generated from.

use super::ProjectedCard;

const CRLF: &str = "\r\n";

/// Serialize a projection as a vCard 3.0 record.
///
/// Line order: `FN` and `N`, personal email and phones, then `TITLE` / `ORG` /
/// work `EMAIL` / work `TEL` for each professional entry in projection order.
/// An empty projection still yields a `BEGIN`/`VERSION`/`END` record.
pub fn to_vcard(card: &ProjectedCard) -> String {
    let mut lines: Vec<String> = vec!["BEGIN:VCARD".into(), "VERSION:3.0".into()];
    let personal = &card.personal;

    if let Some(name) = &personal.full_name {
        lines.push(format!("FN:{}", escape(name)));
        let (family, given) = split_name(name);
        lines.push(format!("N:{};{};;;", escape(family), escape(&given)));
    }
    if let Some(email) = &personal.primary_email {
        lines.push(format!("EMAIL;TYPE=INTERNET:{}", escape(email)));
    }
    if let Some(mobile) = &personal.mobile_number {
        lines.push(format!("TEL;TYPE=CELL:{}", escape(mobile)));
    }
    if let Some(phone) = &personal.alternate_mobile {
        lines.push(format!("TEL;TYPE=HOME:{}", escape(phone)));
    }

    for entry in &card.professional {
        if let Some(title) = &entry.designation {
            lines.push(format!("TITLE:{}", escape(title)));
        }
        if let Some(company) = &entry.company_name {
            // ORG components are ';' separated: organization;unit
            let org = match &entry.department {
                Some(dept) => format!("{};{}", escape(company), escape(dept)),
                None => escape(company),
            };
            lines.push(format!("ORG:{org}"));
        }
        if let Some(email) = &entry.office_email {
            lines.push(format!("EMAIL;TYPE=INTERNET,WORK:{}", escape(email)));
        }
        if let Some(phone) = &entry.office_phone {
            lines.push(format!("TEL;TYPE=WORK:{}", escape(phone)));
        }
    }

    lines.push("END:VCARD".into());

    let mut out = lines.join(CRLF);
    out.push_str(CRLF);
    out
}

/// Download file name for a projection, `"<full name>.vcf"` or `"contact.vcf"`
pub fn contact_file_name(card: &ProjectedCard) -> String {
    let stem: String = card
        .personal
        .full_name
        .as_deref()
        .unwrap_or_default()
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if stem.is_empty() {
        "contact.vcf".to_string()
    } else {
        format!("{stem}.vcf")
    }
}

/// `(family, given)` for the structured `N` property.
///
/// The last word is the family name and the rest the given names; a
/// single word is treated as a given name.
fn split_name(full_name: &str) -> (&str, String) {
    let words: Vec<&str> = full_name.split_whitespace().collect();
    match words.split_last() {
        Some((last, rest)) if !rest.is_empty() => (last, rest.join(" ")),
        Some((only, _)) => ("", (*only).to_string()),
        None => ("", String::new()),
    }
}

/// RFC 2426 text value escaping
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{ProjectedPersonal, ProjectedProfessional};

    fn lines(vcard: &str) -> Vec<&str> {
        vcard.split("\r\n").filter(|l| !l.is_empty()).collect()
    }

    #[test]
    fn test_empty_projection_is_minimal_record() {
        let out = to_vcard(&ProjectedCard::default());
        assert_eq!(out, "BEGIN:VCARD\r\nVERSION:3.0\r\nEND:VCARD\r\n");
    }

    #[test]
    fn test_only_projected_fields_are_written() {
        let card = ProjectedCard {
            personal: ProjectedPersonal {
                full_name: Some("Jane Doe".into()),
                mobile_number: Some("+1 555 0199".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let out = to_vcard(&card);
        assert_eq!(
            lines(&out),
            vec![
                "BEGIN:VCARD",
                "VERSION:3.0",
                "FN:Jane Doe",
                "N:Doe;Jane;;;",
                "TEL;TYPE=CELL:+1 555 0199",
                "END:VCARD"
            ]
        );
        assert!(!out.contains("EMAIL"));
    }

    #[test]
    fn test_each_professional_entry_contributes_lines_in_order() {
        let card = ProjectedCard {
            professional: vec![
                ProjectedProfessional {
                    id: "p1".into(),
                    designation: Some("CTO".into()),
                    company_name: Some("Acme".into()),
                    department: Some("R&D".into()),
                    office_email: Some("jane@acme.com".into()),
                    ..Default::default()
                },
                ProjectedProfessional {
                    id: "p2".into(),
                    designation: Some("Advisor".into()),
                    company_name: Some("Globex".into()),
                    office_phone: Some("+1 555 0100".into()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let out = to_vcard(&card);
        assert_eq!(
            lines(&out)[2..6],
            [
                "TITLE:CTO",
                "ORG:Acme;R&D",
                "EMAIL;TYPE=INTERNET,WORK:jane@acme.com",
                "TITLE:Advisor",
            ]
        );
        assert!(out.contains("ORG:Globex\r\nTEL;TYPE=WORK:+1 555 0100\r\n"));
        assert!(out.ends_with("END:VCARD\r\n"));
    }

    #[test]
    fn test_structured_name_follows_full_name() {
        let mut card = ProjectedCard::default();

        card.personal.full_name = Some("Mary Ann  van Dyke".into());
        let out = to_vcard(&card);
        assert!(out.contains("FN:Mary Ann  van Dyke\r\nN:Dyke;Mary Ann van;;;\r\n"));

        card.personal.full_name = Some("Cher".into());
        assert!(to_vcard(&card).contains("\r\nN:;Cher;;;\r\n"));

        card.personal.full_name = Some("Jane Doe, Jr.".into());
        assert!(to_vcard(&card).contains("\r\nN:Jr.;Jane Doe\\,;;;\r\n"));

        // no FN, no N
        card.personal.full_name = None;
        assert!(!to_vcard(&card).contains("N:"));
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("Jane Doe"), ("Doe", "Jane".to_string()));
        assert_eq!(split_name("  Cher "), ("", "Cher".to_string()));
        assert_eq!(split_name("   "), ("", String::new()));
    }

    #[test]
    fn test_text_values_are_escaped() {
        assert_eq!(escape("Doe, Jane; Jr.\\"), "Doe\\, Jane\\; Jr.\\\\");
        assert_eq!(escape("line one\r\nline two"), "line one\\nline two");
    }

    #[test]
    fn test_contact_file_name() {
        let mut card = ProjectedCard::default();
        assert_eq!(contact_file_name(&card), "contact.vcf");

        card.personal.full_name = Some(" Jane/Doe ".into());
        assert_eq!(contact_file_name(&card), "Jane_Doe.vcf");
    }
}
