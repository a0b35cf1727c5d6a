use clap::Parser;
use cvesearch::application::{Application, Args};
use cvesearch::config::Config;
use log::{error, trace};
use simple_logger::SimpleLogger;

use std::process::exit;

fn main() {
    let args = Args::parse();
    if let Err(e) = SimpleLogger::new().with_level(args.log_level()).init() {
        eprintln!("Unable to initialize the logger: {}", e);
    }
    trace!("Arguments: {:?}", args);

    let config = match Config::from_args(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Usage: cvesearch [OPTIONS] <KEYWORDS>...");
            exit(1);
        }
    };

    let result = Application::new(config).and_then(|application| application.run());
    if let Err(e) = result {
        error!("The application stopped: {:?}", e);
        eprintln!("{}", e);
        exit(1);
    }
}
