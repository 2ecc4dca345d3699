#[tokio::main]
async fn main() {
    if let Err(e) = pemakluman_lib::run().await {
        tracing::error!(error = %e, "Pemakluman exited with an error");
        std::process::exit(1);
    }
}
