//! main.rs
//! Entry point for quickview

use clap::Parser;

use quickview_tui::app::App;
use quickview_tui::config::Config;
use quickview_tui::screen::platform_screen;
use quickview_tui::utils::cli::{Cli, init_logger};

fn main() {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[quickview] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let cli = Cli::parse();
    init_logger(cli.log_level());

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[quickview] Error: {}", e);
            std::process::exit(1);
        }
    };

    let screen = match platform_screen() {
        Ok(screen) => screen,
        Err(e) => {
            eprintln!("[quickview] Error: cannot open the terminal: {}", e);
            std::process::exit(1);
        }
    };

    let mut app = App::new(screen, config);
    if let Err(e) = app.init() {
        let _ = app.shutdown();
        eprintln!("[quickview] Error: failed to initialize the terminal: {}", e);
        std::process::exit(1);
    }

    let result = app.run();
    let restored = app.shutdown();
    if let Err(e) = result.and(restored) {
        eprintln!("[quickview] Error: {}", e);
        std::process::exit(1);
    }
}
