//! System instructions for the concierge's two jobs: FAQ-grounded support
//! chat and device compatibility checks.

/// Answer language for the support chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    My,
}

impl Locale {
    fn language(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::My => "Burmese",
        }
    }
}

/// Reference FAQ embedded into the support system prompt.
const FAQ: &[(&str, &str)] = &[
    (
        "What is an eSIM?",
        "An eSIM is a digital SIM built into your phone. Instead of inserting a \
         plastic card you scan a QR code and the plan activates in minutes.",
    ),
    (
        "How do I get an eSIM?",
        "Choose a plan, pay with the payment QR at checkout, and we send an \
         activation QR code. Scan it in your phone's settings to install the plan.",
    ),
    (
        "Is my phone compatible?",
        "Most phones released since 2018 support eSIM, including iPhone XS and \
         later, Google Pixel 3 and later, and recent Samsung Galaxy flagships. \
         The phone must also be carrier-unlocked.",
    ),
    (
        "Which plan is best for tourists?",
        "The Tourist Pack covers short trips; for stays of a month or longer the \
         Power User plan is the best value.",
    ),
    (
        "Which mobile operators are supported?",
        "Plans run on the MPT, ATOM, Ooredoo, and Mytel networks with nationwide \
         4G/LTE coverage.",
    ),
    (
        "Can I keep my physical SIM?",
        "Yes. The eSIM works alongside your physical SIM, so you can keep your \
         home number active while using local data.",
    ),
    (
        "Does the plan include calls and SMS?",
        "Plans are data-only. Calls and messaging work over data apps such as \
         Viber and WhatsApp.",
    ),
    (
        "How do I pay?",
        "Checkout shows a payment QR code with the exact amount and your order \
         number. Scan it with your banking or wallet app; the code expires after \
         ten minutes and a fresh one is issued if you retry.",
    ),
];

/// Build the support-chat system instruction, FAQ included.
pub fn support_system_prompt(locale: Locale) -> String {
    let faq_context = FAQ
        .iter()
        .map(|(q, a)| format!("Q: {q}\nA: {a}"))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are an AI assistant for Nexora, an eSIM reseller. Answer questions \
         about eSIM services in {}. Use the following FAQ as reference:\n\n{}\n\n\
         Keep responses concise and helpful. For purchase inquiries, use: \
         [View eSIM Plans](/buy-esim)",
        locale.language(),
        faq_context
    )
}

/// Build the device compatibility instruction. The model must answer with
/// strict JSON so the caller can parse the verdict.
pub fn compatibility_prompt(device: &str) -> String {
    format!(
        "Analyze the device model \"{device}\" to determine if it supports eSIM \
         technology. Provide a concise reason for your conclusion. Respond with \
         strict JSON only, no markdown fences, in the shape \
         {{\"isCompatible\": \"YES\" | \"NO\" | \"UNCERTAIN\", \"reason\": \
         \"one sentence\"}}."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_support_prompt_embeds_faq() {
        let prompt = support_system_prompt(Locale::En);
        assert!(prompt.contains("What is an eSIM?"));
        assert!(prompt.contains("[View eSIM Plans](/buy-esim)"));
        assert!(prompt.contains("in English"));
    }

    #[test]
    fn test_support_prompt_switches_language() {
        assert!(support_system_prompt(Locale::My).contains("in Burmese"));
    }

    #[test]
    fn test_compatibility_prompt_names_device() {
        let prompt = compatibility_prompt("iPhone 15 Pro");
        assert!(prompt.contains("iPhone 15 Pro"));
        assert!(prompt.contains("isCompatible"));
    }
}
