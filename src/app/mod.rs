use crate::core::{MessageRequest, MessageTransport};
use std::io::Write;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Sends `request` once and writes the console report.
///
/// Success goes to `out`, failure to `err`. Returns the process exit code.
pub async fn run<T, O, E>(transport: &T, request: &MessageRequest, out: &mut O, err: &mut E) -> i32
where
    T: MessageTransport + ?Sized,
    O: Write,
    E: Write,
{
    tracing::info!("📧 Sending message to {}", request.to);

    match transport.send(request).await {
        Ok(result) => {
            tracing::info!("✅ Provider accepted the request");
            // 輸出失敗時不改變結果，發送已經完成
            let _ = writeln!(out, "Email sent successfully!");
            let _ = writeln!(out, "Response: {}", result);
            EXIT_SUCCESS
        }
        Err(e) => {
            tracing::error!("❌ Send failed: {}", e);
            report_failure(err, &e)
        }
    }
}

/// Writes the failure line and returns the failure exit code.
pub fn report_failure<E: Write>(err: &mut E, error: &dyn std::fmt::Display) -> i32 {
    let _ = writeln!(err, "Failed to send email: {}", error);
    EXIT_FAILURE
}
