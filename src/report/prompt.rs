//! Prompt templates for the chat-completion generator

use super::ReportRequest;

pub const SYSTEM_PROMPT: &str = "You are an industrial maintenance expert. \
Write clear, practical instructions a field technician can act on immediately.";

/// Work-order template. Placeholders are filled by [`build_work_order_prompt`].
const WORK_ORDER_PROMPT: &str = r#"Analyze the condition data below and write a maintenance work order that the crew on site can act on immediately.

### EQUIPMENT
{equipment}

### CONDITION DATA
- Diagnosis: {state} (remaining useful life {rul} hours)
- Key readings: RMS {rms}, Kurtosis {kurtosis}

### REFERENCE MANUAL
{manual_context}

### RULES
1. Use Markdown for readability.
2. Fill in every bracketed field. No preamble.

### OUTPUT FORMAT
### 1. Diagnosis Summary
- Current state: **{state}**
- Remaining useful life: approximately **{rul} hours**

### 2. Cause Analysis
- **RMS ({rms})**: [analysis]
- **Kurtosis ({kurtosis})**: [analysis]
- Overall finding: [conclusion]

### 3. Recommended Actions
- **Immediate action**: [specific instruction]
- **Replacement parts**: [part names]
- **Work priority**: [Urgent | Normal]"#;

/// Render the user prompt for one request.
pub fn build_work_order_prompt(request: &ReportRequest) -> String {
    WORK_ORDER_PROMPT
        .replace("{equipment}", &request.equipment)
        .replace("{state}", request.state.label())
        .replace("{rul}", &format!("{:.1}", request.rul_hours))
        .replace("{rms}", &format!("{:.3}", request.features.rms))
        .replace("{kurtosis}", &format!("{:.3}", request.features.kurtosis))
        .replace("{manual_context}", &request.manual_context.join("\n"))
}

/// Attribution line appended to generated reports.
pub fn caption(model: &str, timestamp: &str) -> String {
    format!("Generated by bearing-sentinel • Model: {model} • Time: {timestamp}")
}
