//! Reveal panel
//!
//! The offer shown once the card is scratched off, plus its terms and
//! conditions disclosure. The only state is whether the terms are open.

use serde::Serialize;
use std::fmt;

/// Offer text shown on the panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferCopy {
    /// Main offer description
    pub headline: String,
    /// Validity window
    pub validity: String,
    /// Closing line
    pub closing: String,
    /// Label of the terms toggle
    pub terms_label: String,
    /// External call-to-action link
    pub link: Link,
}

/// External link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Visible label
    pub label: String,
    /// Target URL (opened in a new context)
    pub href: String,
}

/// One numbered terms section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermsSection {
    /// Section title, without its number
    pub title: String,
    /// Introductory paragraph, may be empty
    pub body: String,
    /// Bulleted or numbered items
    pub items: Vec<String>,
}

impl TermsSection {
    fn text(title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            items: Vec::new(),
        }
    }

    fn list(title: &str, body: &str, items: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            items: items.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Contest terms and conditions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermsAndConditions {
    /// Heading
    pub title: String,
    /// Sections in order
    pub sections: Vec<TermsSection>,
    /// Acceptance footer
    pub footer: String,
}

impl Default for OfferCopy {
    fn default() -> Self {
        Self {
            headline: "Enjoy a $2,500 credit toward your next event or celebration. This amount \
                       will be deducted from any package valued at $10,000 or more, including \
                       catering services, event rentals, entertainment, venue services, AV, \
                       staging, and lighting."
                .to_string(),
            validity: "This offer is valid for new bookings taking place between January 1, \
                       2026 and April 1, 2026."
                .to_string(),
            closing: "Let the celebration begin!".to_string(),
            terms_label: "Terms & Conditions apply".to_string(),
            link: Link {
                label: "Visit the MME worldwide Website".to_string(),
                href: "https://www.48wallnyc.com/".to_string(),
            },
        }
    }
}

impl Default for TermsAndConditions {
    fn default() -> Self {
        Self {
            title: "Contest Terms & Conditions".to_string(),
            sections: vec![
                TermsSection::text(
                    "Eligibility",
                    "This promotion is open to individuals 18 years or older. Employees of MME \
                     Worldwide, its affiliates, partners, and their immediate family members are \
                     not eligible to participate. The contest is valid only in the state of New \
                     York.",
                ),
                TermsSection::text(
                    "How to Enter",
                    "Participants must access the contest webpage through the QR code provided \
                     in the holiday card.",
                ),
                TermsSection::text(
                    "Contest Period",
                    "The contest is valid until December 31st, 2025. Entries submitted outside \
                     the contest period will not be honored.",
                ),
                TermsSection::list(
                    "Prizes",
                    "Prizes are:",
                    &[
                        "Valid for new bookings only.",
                        "Redeemable for events taking place between January 1, 2026 and April \
                         1, 2026.",
                        "Not transferable and not redeemable for cash.",
                        "Subject to date availability and standard venue booking policies.",
                    ],
                ),
                TermsSection::text(
                    "Winner Verification & Redemption",
                    "To redeem a prize, winners must mention the promotion when booking their \
                     event services. MME Worldwide may request verification of identity or \
                     eligibility before applying the prize to a booking.",
                ),
                TermsSection::list(
                    "Limitations",
                    "",
                    &[
                        "One (1) prize per person or organization.",
                        "Prizes cannot be combined with any other discounts, promotions, or \
                         offers unless explicitly stated.",
                        "MME Worldwide reserves the right to refuse prize redemption for any \
                         booking that does not meet its standard requirements.",
                    ],
                ),
                TermsSection::text(
                    "Liability",
                    "MME Worldwide and its affiliates are not responsible for technical issues, \
                     lost entries, or interruptions that prevent participation. By entering, \
                     participants agree to release the venue from any claims related to the \
                     contest or prize use.",
                ),
                TermsSection::text(
                    "Privacy",
                    "Any personal information collected through the contest will be used \
                     solely for administration of the promotion and will not be sold or shared.",
                ),
                TermsSection::text(
                    "Right to Modify or Cancel",
                    "MME Worldwide reserves the right to amend, suspend, or cancel the \
                     promotion if circumstances outside its control arise.",
                ),
                TermsSection::text(
                    "Acceptance of Terms",
                    "Participation in the contest constitutes full acceptance of these Terms & \
                     Conditions.",
                ),
            ],
            footer: "By participating in this contest and redeeming any prize, you acknowledge \
                     that you have read, understood, and agree to be bound by these Terms & \
                     Conditions."
                .to_string(),
        }
    }
}

impl fmt::Display for TermsAndConditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for (n, section) in self.sections.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "{}. {}", n + 1, section.title)?;
            if !section.body.is_empty() {
                writeln!(f, "{}", section.body)?;
            }
            for item in &section.items {
                writeln!(f, "  - {item}")?;
            }
        }
        writeln!(f)?;
        write!(f, "{}", self.footer)
    }
}

/// Post-completion panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealPanel {
    offer: OfferCopy,
    terms: TermsAndConditions,
    terms_open: bool,
}

impl RevealPanel {
    /// Panel with the given copy, terms closed
    #[inline]
    #[must_use]
    pub fn new(offer: OfferCopy, terms: TermsAndConditions) -> Self {
        Self {
            offer,
            terms,
            terms_open: false,
        }
    }

    /// Offer copy
    #[inline]
    #[must_use]
    pub fn offer(&self) -> &OfferCopy {
        &self.offer
    }

    /// Terms, regardless of whether the disclosure is open
    #[inline]
    #[must_use]
    pub fn terms(&self) -> &TermsAndConditions {
        &self.terms
    }

    /// Whether the terms disclosure is open
    #[inline]
    #[must_use]
    pub fn is_terms_open(&self) -> bool {
        self.terms_open
    }

    /// Open the terms disclosure
    #[inline]
    pub fn open_terms(&mut self) {
        self.terms_open = true;
    }

    /// Close the terms disclosure
    #[inline]
    pub fn close_terms(&mut self) {
        self.terms_open = false;
    }

    /// Flip the terms disclosure, returning the new state
    #[inline]
    pub fn toggle_terms(&mut self) -> bool {
        self.terms_open = !self.terms_open;
        self.terms_open
    }
}

impl Default for RevealPanel {
    fn default() -> Self {
        Self::new(OfferCopy::default(), TermsAndConditions::default())
    }
}

impl fmt::Display for RevealPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.offer.headline)?;
        writeln!(f, "{}", self.offer.validity)?;
        writeln!(f, "{}", self.offer.closing)?;
        writeln!(f, "[{}]", self.offer.terms_label)?;
        write!(f, "{} <{}>", self.offer.link.label, self.offer.link.href)?;
        if self.terms_open {
            write!(f, "\n\n{}", self.terms)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_start_closed_and_toggle() {
        let mut panel = RevealPanel::default();
        assert!(!panel.is_terms_open());
        assert!(panel.toggle_terms());
        assert!(!panel.toggle_terms());
        panel.open_terms();
        panel.open_terms();
        assert!(panel.is_terms_open());
        panel.close_terms();
        assert!(!panel.is_terms_open());
    }

    #[test]
    fn default_terms_have_ten_sections() {
        let terms = TermsAndConditions::default();
        assert_eq!(terms.sections.len(), 10);
        assert_eq!(terms.sections[3].items.len(), 4);
        assert!(terms.to_string().contains("10. Acceptance of Terms"));
    }

    #[test]
    fn rendering_includes_terms_only_when_open() {
        let mut panel = RevealPanel::default();
        assert!(!panel.to_string().contains("Eligibility"));
        panel.open_terms();
        let text = panel.to_string();
        assert!(text.contains("1. Eligibility"));
        assert!(text.contains("https://www.48wallnyc.com/"));
    }
}
