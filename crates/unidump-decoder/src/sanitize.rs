use unicode_general_category::{GeneralCategory, get_general_category};

/// Stand-in shown for characters that would break the text column.
pub const PLACEHOLDER: char = '.';

/// Two-letter Unicode general category abbreviation (`"Lu"`, `"Cc"`, ...).
///
/// Code points missing from the Unicode tables report `"Cn"`.
#[must_use]
pub fn category_abbr(ch: char) -> &'static str {
    use GeneralCategory as G;

    #[allow(unreachable_patterns)]
    match get_general_category(ch) {
        G::UppercaseLetter => "Lu",
        G::LowercaseLetter => "Ll",
        G::TitlecaseLetter => "Lt",
        G::ModifierLetter => "Lm",
        G::OtherLetter => "Lo",
        G::NonspacingMark => "Mn",
        G::SpacingMark => "Mc",
        G::EnclosingMark => "Me",
        G::DecimalNumber => "Nd",
        G::LetterNumber => "Nl",
        G::OtherNumber => "No",
        G::ConnectorPunctuation => "Pc",
        G::DashPunctuation => "Pd",
        G::OpenPunctuation => "Ps",
        G::ClosePunctuation => "Pe",
        G::InitialPunctuation => "Pi",
        G::FinalPunctuation => "Pf",
        G::OtherPunctuation => "Po",
        G::MathSymbol => "Sm",
        G::CurrencySymbol => "Sc",
        G::ModifierSymbol => "Sk",
        G::OtherSymbol => "So",
        G::SpaceSeparator => "Zs",
        G::LineSeparator => "Zl",
        G::ParagraphSeparator => "Zp",
        G::Control => "Cc",
        G::Format => "Cf",
        G::Surrogate => "Cs",
        G::PrivateUse => "Co",
        G::Unassigned => "Cn",
        _ => "Cn",
    }
}

/// Whether `ch` is a control, format, private-use, unassigned or separator
/// character (categories `C*` and `Z*`).
#[must_use]
pub fn is_hidden(ch: char) -> bool {
    category_abbr(ch).starts_with(['C', 'Z'])
}

/// Display form of a decoded character: the character itself, or
/// [`PLACEHOLDER`] when it is hidden.
#[must_use]
pub fn sanitize(ch: char) -> char {
    if is_hidden(ch) { PLACEHOLDER } else { ch }
}
