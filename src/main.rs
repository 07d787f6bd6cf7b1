#[actix_web::main]
async fn main() -> std::io::Result<()> {
    cash_register_server::run().await
}
