/// Field label standardization shared by the csv and txt renderers.

/// Turns raw xpaths into human-facing variable labels.
pub trait Standardizer {
    /// Readable label for the field at `xpath`.
    fn label(&self, xpath: &str) -> String;
}

/// Derives labels from the element names in the xpath itself.
///
/// `/Return/ReturnData/IRS990/TotalRevenueAmt` → `Total Revenue Amt`.
#[derive(Debug, Default, Clone, Copy)]
pub struct XpathStandardizer;

impl Standardizer for XpathStandardizer {
    fn label(&self, xpath: &str) -> String {
        let leaf = xpath.rsplit('/').next().unwrap_or(xpath);
        split_camel_case(leaf)
    }
}

/// Insert spaces at lower→upper and acronym→word boundaries.
fn split_camel_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                out.push(' ');
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_leaf() {
        let s = XpathStandardizer;
        assert_eq!(
            s.label("/Return/ReturnData/IRS990/TotalRevenueAmt"),
            "Total Revenue Amt"
        );
    }

    #[test]
    fn test_acronym_boundary() {
        assert_eq!(split_camel_case("EINOfFiler"), "EIN Of Filer");
        assert_eq!(split_camel_case("IRS990"), "IRS990");
    }

    #[test]
    fn test_plain_name() {
        assert_eq!(XpathStandardizer.label("Desc"), "Desc");
    }
}
