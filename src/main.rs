use std::path::Path;

use vitrine::{Options, Viewer};

fn resolve_options(arg: Option<String>) -> Result<Options, String> {
    let Some(path) = arg else {
        return Ok(Options::default());
    };
    let path = Path::new(&path);
    if !path.exists() {
        return Err(format!("options file not found: {}", path.display()));
    }
    let options = Options::load(path).map_err(|e| e.to_string())?;
    log::info!("loaded options from {}", path.display());
    Ok(options)
}

fn main() {
    env_logger::init();

    let options = match resolve_options(std::env::args().nth(1)) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            log::error!("Usage: vitrine [OPTIONS.toml]");
            std::process::exit(1);
        }
    };

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
