//! ISO-4217 Currency Codes with Macro-Based Generation
//!
//! The set of currencies the conversion service accepts is closed: a code is
//! valid only if it is listed in the `define_currencies!` invocation below.
//! The macro generates the `CurrencyCode` enum, its string conversions and the
//! membership test used by request validation.
//!
//! # Adding a New Currency
//! Add a line to the `define_currencies!` invocation:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     XDR => ("XDR", "SDR (Special Drawing Right)"),
//! }
//! ```
//!
//! # Example
//! ```
//! use currencies::CurrencyCode;
//!
//! let eur: CurrencyCode = "EUR".parse().unwrap();
//! assert_eq!(eur, CurrencyCode::EUR);
//! assert!(currencies::is_known("USD"));
//! assert!(!currencies::is_known("XXX"));
//! ```

/// Error returned when a string is not a member of the known currency set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown currency: {0}")]
pub struct UnknownCurrency(pub String);

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines the CurrencyCode enum and its lookups
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define the known currency set.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     VariantName => ("CODE", "Display name"),
/// }
/// ```
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $display:literal)
        ),* $(,)?
    ) => {
        /// A currency code from the known ISO-4217 set.
        #[allow(clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        pub enum CurrencyCode {
            $($name),*
        }

        impl CurrencyCode {
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $display),*
                }
            }

            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }
        }

        impl std::fmt::Display for CurrencyCode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.code())
            }
        }

        /// Codes are matched exactly; `"eur"` is not a member of the set.
        impl std::str::FromStr for CurrencyCode {
            type Err = $crate::UnknownCurrency;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok(CurrencyCode::$name),)*
                    _ => Err($crate::UnknownCurrency(s.to_string())),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    AED => ("AED", "UAE Dirham"),
    AFN => ("AFN", "Afghani"),
    ALL => ("ALL", "Lek"),
    AMD => ("AMD", "Armenian Dram"),
    ANG => ("ANG", "Netherlands Antillean Guilder"),
    AOA => ("AOA", "Kwanza"),
    ARS => ("ARS", "Argentine Peso"),
    AUD => ("AUD", "Australian Dollar"),
    AWG => ("AWG", "Aruban Florin"),
    AZN => ("AZN", "Azerbaijan Manat"),
    BAM => ("BAM", "Convertible Mark"),
    BBD => ("BBD", "Barbados Dollar"),
    BDT => ("BDT", "Taka"),
    BGN => ("BGN", "Bulgarian Lev"),
    BHD => ("BHD", "Bahraini Dinar"),
    BIF => ("BIF", "Burundi Franc"),
    BMD => ("BMD", "Bermudian Dollar"),
    BND => ("BND", "Brunei Dollar"),
    BOB => ("BOB", "Boliviano"),
    BRL => ("BRL", "Brazilian Real"),
    BSD => ("BSD", "Bahamian Dollar"),
    BTN => ("BTN", "Ngultrum"),
    BWP => ("BWP", "Pula"),
    BYN => ("BYN", "Belarusian Ruble"),
    BZD => ("BZD", "Belize Dollar"),
    CAD => ("CAD", "Canadian Dollar"),
    CDF => ("CDF", "Congolese Franc"),
    CHF => ("CHF", "Swiss Franc"),
    CLP => ("CLP", "Chilean Peso"),
    CNY => ("CNY", "Yuan Renminbi"),
    COP => ("COP", "Colombian Peso"),
    CRC => ("CRC", "Costa Rican Colon"),
    CUP => ("CUP", "Cuban Peso"),
    CVE => ("CVE", "Cabo Verde Escudo"),
    CZK => ("CZK", "Czech Koruna"),
    DJF => ("DJF", "Djibouti Franc"),
    DKK => ("DKK", "Danish Krone"),
    DOP => ("DOP", "Dominican Peso"),
    DZD => ("DZD", "Algerian Dinar"),
    EGP => ("EGP", "Egyptian Pound"),
    ERN => ("ERN", "Nakfa"),
    ETB => ("ETB", "Ethiopian Birr"),
    EUR => ("EUR", "Euro"),
    FJD => ("FJD", "Fiji Dollar"),
    FKP => ("FKP", "Falkland Islands Pound"),
    GBP => ("GBP", "Pound Sterling"),
    GEL => ("GEL", "Lari"),
    GHS => ("GHS", "Ghana Cedi"),
    GIP => ("GIP", "Gibraltar Pound"),
    GMD => ("GMD", "Dalasi"),
    GNF => ("GNF", "Guinean Franc"),
    GTQ => ("GTQ", "Quetzal"),
    GYD => ("GYD", "Guyana Dollar"),
    HKD => ("HKD", "Hong Kong Dollar"),
    HNL => ("HNL", "Lempira"),
    HTG => ("HTG", "Gourde"),
    HUF => ("HUF", "Forint"),
    IDR => ("IDR", "Rupiah"),
    ILS => ("ILS", "New Israeli Sheqel"),
    INR => ("INR", "Indian Rupee"),
    IQD => ("IQD", "Iraqi Dinar"),
    IRR => ("IRR", "Iranian Rial"),
    ISK => ("ISK", "Iceland Krona"),
    JMD => ("JMD", "Jamaican Dollar"),
    JOD => ("JOD", "Jordanian Dinar"),
    JPY => ("JPY", "Yen"),
    KES => ("KES", "Kenyan Shilling"),
    KGS => ("KGS", "Som"),
    KHR => ("KHR", "Riel"),
    KMF => ("KMF", "Comorian Franc"),
    KPW => ("KPW", "North Korean Won"),
    KRW => ("KRW", "Won"),
    KWD => ("KWD", "Kuwaiti Dinar"),
    KYD => ("KYD", "Cayman Islands Dollar"),
    KZT => ("KZT", "Tenge"),
    LAK => ("LAK", "Lao Kip"),
    LBP => ("LBP", "Lebanese Pound"),
    LKR => ("LKR", "Sri Lanka Rupee"),
    LRD => ("LRD", "Liberian Dollar"),
    LSL => ("LSL", "Loti"),
    LYD => ("LYD", "Libyan Dinar"),
    MAD => ("MAD", "Moroccan Dirham"),
    MDL => ("MDL", "Moldovan Leu"),
    MGA => ("MGA", "Malagasy Ariary"),
    MKD => ("MKD", "Denar"),
    MMK => ("MMK", "Kyat"),
    MNT => ("MNT", "Tugrik"),
    MOP => ("MOP", "Pataca"),
    MRU => ("MRU", "Ouguiya"),
    MUR => ("MUR", "Mauritius Rupee"),
    MVR => ("MVR", "Rufiyaa"),
    MWK => ("MWK", "Malawi Kwacha"),
    MXN => ("MXN", "Mexican Peso"),
    MYR => ("MYR", "Malaysian Ringgit"),
    MZN => ("MZN", "Mozambique Metical"),
    NAD => ("NAD", "Namibia Dollar"),
    NGN => ("NGN", "Naira"),
    NIO => ("NIO", "Cordoba Oro"),
    NOK => ("NOK", "Norwegian Krone"),
    NPR => ("NPR", "Nepalese Rupee"),
    NZD => ("NZD", "New Zealand Dollar"),
    OMR => ("OMR", "Rial Omani"),
    PAB => ("PAB", "Balboa"),
    PEN => ("PEN", "Sol"),
    PGK => ("PGK", "Kina"),
    PHP => ("PHP", "Philippine Peso"),
    PKR => ("PKR", "Pakistan Rupee"),
    PLN => ("PLN", "Zloty"),
    PYG => ("PYG", "Guarani"),
    QAR => ("QAR", "Qatari Rial"),
    RON => ("RON", "Romanian Leu"),
    RSD => ("RSD", "Serbian Dinar"),
    RUB => ("RUB", "Russian Ruble"),
    RWF => ("RWF", "Rwanda Franc"),
    SAR => ("SAR", "Saudi Riyal"),
    SBD => ("SBD", "Solomon Islands Dollar"),
    SCR => ("SCR", "Seychelles Rupee"),
    SDG => ("SDG", "Sudanese Pound"),
    SEK => ("SEK", "Swedish Krona"),
    SGD => ("SGD", "Singapore Dollar"),
    SHP => ("SHP", "Saint Helena Pound"),
    SLE => ("SLE", "Leone"),
    SOS => ("SOS", "Somali Shilling"),
    SRD => ("SRD", "Surinam Dollar"),
    SSP => ("SSP", "South Sudanese Pound"),
    STN => ("STN", "Dobra"),
    SYP => ("SYP", "Syrian Pound"),
    SZL => ("SZL", "Lilangeni"),
    THB => ("THB", "Baht"),
    TJS => ("TJS", "Somoni"),
    TMT => ("TMT", "Turkmenistan New Manat"),
    TND => ("TND", "Tunisian Dinar"),
    TOP => ("TOP", "Pa'anga"),
    TRY => ("TRY", "Turkish Lira"),
    TTD => ("TTD", "Trinidad and Tobago Dollar"),
    TWD => ("TWD", "New Taiwan Dollar"),
    TZS => ("TZS", "Tanzanian Shilling"),
    UAH => ("UAH", "Hryvnia"),
    UGX => ("UGX", "Uganda Shilling"),
    USD => ("USD", "US Dollar"),
    UYU => ("UYU", "Peso Uruguayo"),
    UZS => ("UZS", "Uzbekistan Sum"),
    VES => ("VES", "Bolivar Soberano"),
    VND => ("VND", "Dong"),
    VUV => ("VUV", "Vatu"),
    WST => ("WST", "Tala"),
    XAF => ("XAF", "CFA Franc BEAC"),
    XCD => ("XCD", "East Caribbean Dollar"),
    XOF => ("XOF", "CFA Franc BCEAO"),
    XPF => ("XPF", "CFP Franc"),
    YER => ("YER", "Yemeni Rial"),
    ZAR => ("ZAR", "Rand"),
    ZMW => ("ZMW", "Zambian Kwacha"),
    ZWL => ("ZWL", "Zimbabwe Dollar"),
}

/// Anchor currencies used for triangular and base conversion when none are
/// configured. Order is the tie-break: earlier anchors win.
pub const DEFAULT_ANCHORS: &[CurrencyCode] = &[
    CurrencyCode::USD,
    CurrencyCode::EUR,
    CurrencyCode::GBP,
    CurrencyCode::JPY,
    CurrencyCode::CHF,
];

/// Returns true if `code` belongs to the known currency set.
pub fn is_known(code: &str) -> bool {
    code.parse::<CurrencyCode>().is_ok()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code_parse() {
        assert_eq!("USD".parse::<CurrencyCode>().unwrap(), CurrencyCode::USD);
        assert_eq!("EUR".parse::<CurrencyCode>().unwrap(), CurrencyCode::EUR);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            "eur".parse::<CurrencyCode>(),
            Err(UnknownCurrency("eur".to_string()))
        );
    }

    #[test]
    fn test_well_formed_but_unknown_code_rejected() {
        assert!(!is_known("XXX"));
        assert!(!is_known("ABC"));
        assert!(!is_known(""));
        assert!(!is_known("US"));
    }

    #[test]
    fn test_currency_code_display() {
        assert_eq!(CurrencyCode::USD.to_string(), "USD");
        assert_eq!(CurrencyCode::GBP.name(), "Pound Sterling");
    }

    #[test]
    fn test_all_codes_round_trip_through_from_str() {
        for code in CurrencyCode::all() {
            assert_eq!(code.code().parse::<CurrencyCode>().unwrap(), *code);
            assert_eq!(code.code().len(), 3);
        }
    }

    #[test]
    fn test_default_anchors_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        assert!(DEFAULT_ANCHORS.iter().all(|c| seen.insert(*c)));
        assert_eq!(DEFAULT_ANCHORS[0], CurrencyCode::USD);
    }

    #[test]
    fn test_serde_uses_code() {
        let json = serde_json::to_string(&CurrencyCode::CHF).unwrap();
        assert_eq!(json, "\"CHF\"");
    }
}
