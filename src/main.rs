use wordtrace;

fn main() -> Result<(), eframe::Error> {
    // Set up logging for development
    env_logger::init();

    // Run the wordtrace application
    wordtrace::run_app()
}
