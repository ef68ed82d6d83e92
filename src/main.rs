fn main() -> std::io::Result<()> {
    tabula_lib::run()
}
