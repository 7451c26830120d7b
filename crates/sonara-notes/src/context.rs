//! Record context builder for note generation.
//!
//! Wraps prior-record text (or its summary) in a structured block that can
//! be prepended to the transcript, giving the model awareness of the
//! client's history without mixing it into the session text.

/// Build a context block from record text. Empty input yields an empty
/// string (no context to inject).
pub fn build_record_block(record_text: &str) -> String {
    if record_text.is_empty() {
        return String::new();
    }

    let mut block = String::from("<client_record>\n");
    block.push_str(record_text);
    if !record_text.ends_with('\n') {
        block.push('\n');
    }
    block.push_str("</client_record>");
    block
}

/// Compose the user message for a note-generation call: record context (if
/// any) followed by the session transcript.
pub fn compose_note_input(record_block: &str, transcript: &str) -> String {
    if record_block.is_empty() {
        return transcript.to_string();
    }
    format!("{record_block}\n\n<session_transcript>\n{transcript}\n</session_transcript>")
}
