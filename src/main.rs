use brewbot::app::App;
use brewbot::config::MachineConfig;
use brewbot::error::user_friendly_message;
use brewbot::util::{init_logging, log_file_path};
use brewbot::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let logging = log_file_path().and_then(|path| init_logging(&path));

    let config = match MachineConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", user_friendly_message(&e));
            return Err(e);
        }
    };
    if let Err(e) = logging {
        eprintln!("logging disabled: {}", user_friendly_message(&e));
    }

    let mut app = App::new(&config)?;
    app.init()?;
    let outcome = app.run().await;
    app.restore()?;

    if let Err(e) = &outcome {
        eprintln!("{}", user_friendly_message(e));
    }
    outcome
}
