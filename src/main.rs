use anyhow::Result;
use qa_import::utils::{init_logging, log_startup};
use qa_import::{Config, DatabaseSink, JsonFileSink, QaImporter, QaSink};

fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    init_logging(config.verbose_logging);

    let paths: Vec<String> = std::env::args().skip(1).collect();
    log_startup(&paths);

    let importer = QaImporter::new(config);
    let pairs = importer.run(&paths)?;

    DatabaseSink.save(&pairs)?;
    if let Some(path) = &importer.config().output_json {
        JsonFileSink::new(path).save(&pairs)?;
    }

    println!("{}", serde_json::to_string_pretty(&pairs)?);

    Ok(())
}
