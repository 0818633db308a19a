//! Prompt text for the content formatter.

use portfolio_forge_core::content::INTERFACE_DEFINITION;

/// Formatting prompt for the developer portfolio: the raw user data plus the
/// interface definition the model must shape it into.
pub fn developer_prompt(data: &serde_json::Value) -> String {
    let input = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
    format!(
        "I want to generate a formatted JSON data for a developer portfolio website. \
         Please use the following data as reference and format it according to the specified interface.\n\
         \n\
         Input Data:\n\
         {input}\n\
         \n\
         Interface Definition:\n\
         {INTERFACE_DEFINITION}\n\
         \n\
         Please generate a valid JSON object that follows this interface structure using the input data provided above."
    )
}
