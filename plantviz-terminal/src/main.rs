/// Plantviz Terminal Demo - the tutorial pyramid scene
///
/// Controls:
///   - WASD / Arrow Keys: Move the wireframe pyramid
///   - P: Toggle perspective/orthographic projection
///   - Q/ESC: Quit
use plantviz_terminal::{config::USAGE, HostSettings, TerminalApp};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> io::Result<()> {
    // Logs go to stderr so they stay out of the rendered frame
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plantviz_terminal=info,plantviz_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let settings = match HostSettings::from_args(std::env::args().skip(1)) {
        Ok(Some(settings)) => settings,
        Ok(None) => {
            println!("{USAGE}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return Err(io::Error::new(io::ErrorKind::InvalidInput, err));
        }
    };
    tracing::info!(?settings, "starting terminal renderer");

    let mut app = TerminalApp::new(settings)?;
    app.run()?;

    tracing::info!("terminal renderer stopped");
    Ok(())
}
