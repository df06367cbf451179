/// Strip spreadsheet-escaping artifacts from an identifier.
///
/// Exports wrap numeric-looking ids as `="123456"` so spreadsheets keep
/// them as text. Removes the `="` prefix and every remaining `"`.
pub fn sanitize_identifier(raw: &str) -> String {
    raw.replace("=\"", "").replace('"', "")
}
