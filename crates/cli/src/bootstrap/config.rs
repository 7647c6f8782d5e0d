use cube_cache_domain::{CliOverrides, Config};

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}
