/// Download filename for an exported resume: the ASCII alphanumeric runs of
/// the person's name joined by underscores, or `Resume.pdf` when nothing
/// usable remains.
pub fn export_filename(name: Option<&str>) -> String {
    let stem = name
        .unwrap_or_default()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    if stem.is_empty() {
        "Resume.pdf".to_string()
    } else {
        format!("{stem}.pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_collapses_to_single_underscores() {
        assert_eq!(export_filename(Some("John O'Brien / Smith!!")), "John_O_Brien_Smith.pdf");
        assert_eq!(export_filename(Some("  Ada   Lovelace ")), "Ada_Lovelace.pdf");
    }

    #[test]
    fn test_fallback_name() {
        assert_eq!(export_filename(None), "Resume.pdf");
        assert_eq!(export_filename(Some("")), "Resume.pdf");
        assert_eq!(export_filename(Some("李小龙")), "Resume.pdf");
    }

    #[test]
    fn test_non_ascii_letters_split_words() {
        assert_eq!(export_filename(Some("José Núñez")), "Jos_N_ez.pdf");
    }
}
