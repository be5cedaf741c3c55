//! Prompt templates with named `{slot}` inputs.

use crate::errors::BotError;

/// Static prompt pattern with declared input slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub input_variables: &'static [&'static str],
    pub template: &'static str,
}

impl PromptTemplate {
    /// Substitutes every declared slot in a single pass.
    ///
    /// The provided keys must match the declared slots exactly; anything extra
    /// or missing is an `InputMismatch`. Braces that do not name a declared
    /// slot are copied through untouched and substituted values are never
    /// expanded again.
    pub fn render(&self, values: &[(&str, &str)]) -> Result<String, BotError> {
        let mut expected: Vec<String> = self.input_variables.iter().map(|s| s.to_string()).collect();
        let mut provided: Vec<String> = values.iter().map(|(k, _)| k.to_string()).collect();
        expected.sort();
        provided.sort();

        let has_duplicates = provided.windows(2).any(|w| w[0] == w[1]);
        if expected != provided || has_duplicates {
            return Err(BotError::InputMismatch {
                template: self.name,
                expected,
                provided,
            });
        }

        let mut rendered = String::with_capacity(self.template.len());
        let mut rest = self.template;
        while let Some(open) = rest.find('{') {
            rendered.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let slot = after
                .find('}')
                .map(|close| &after[..close])
                .and_then(|name| values.iter().find(|(k, _)| *k == name));

            match slot {
                Some((name, value)) => {
                    rendered.push_str(value);
                    rest = &after[name.len() + 1..];
                }
                None => {
                    rendered.push('{');
                    rest = after;
                }
            }
        }
        rendered.push_str(rest);

        Ok(rendered)
    }
}

pub const MODERATION_PROMPT: PromptTemplate = PromptTemplate {
    name: "moderation",
    input_variables: &["message_content"],
    template: "You are an avid Lionel Messi and FC Barcelona fan. Analyze the following message and determine the tone of the message.
If the tone of the message includes criticism, vulgarity, racial slurs, or mockery towards Lionel Messi or FC Barcelona,
return \"1\". Otherwise, return \"0\". If the context of the message is unclear or inconclusive, return \"0\".
If the message is too short to understand the context, return \"0\". If the message is not in English, return \"0\".

Message: {message_content}

Your output should be in the following format:
0 or 1

VERY IMPORTANT: This format should be strictly followed. No other text or explanation is allowed.
",
};

pub const SUMMARY_PROMPT: PromptTemplate = PromptTemplate {
    name: "transcript_summary",
    input_variables: &["transcript"],
    template: "Summarize the following transcript into concise bullet points:

{transcript}

Summary:
-
",
};

pub const QUOTE_PROMPT: PromptTemplate = PromptTemplate {
    name: "messi_quote",
    input_variables: &[],
    template: concat!(
        "Give a real quote about Lionel Messi, said by football legends. Make sure that the quote is in English and is not fake.\n",
        "\n",
        "Your output should be in the following format:\n",
        "'They tell me that all men are equal in God’s eyes, this player makes you seriously think about those words.' - soccer commentator Ray Hudson \n",
        "\n",
        "Don't deviate from this format and DON NOT give the same quotes DO NOT write \"Here is a  quote about Lionel Messi and FC Barcelona , said by football legends:\" or anything else at the beginning.\n",
    ),
};

/// Fixed notice posted after a message is removed by moderation.
pub const MODERATION_NOTICE: &str = "Message deleted because Messi is the GOAT and FC Barcelona is more than just a club, VISCA EL BARCA.";
