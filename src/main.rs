use clap::Parser;
use company_registry::utils::error::ErrorSeverity;
use company_registry::utils::{logger, validation::Validate};
use company_registry::{
    CliConfig, Command, CompanyRecord, CompanyStore, LocalStorage, RegistryError, Storage,
};

fn main() {
    let config = CliConfig::parse();

    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let settings = match config.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(config.verbose, settings.log_level(), settings.logging.format);
    tracing::debug!("CLI config: {:?}", config);

    let mut store = CompanyStore::open(LocalStorage::default(), &settings);
    tracing::debug!("Bound to {}", store.binding().path.display());

    if let Err(e) = run(&mut store, config.command) {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn run<S: Storage>(store: &mut CompanyStore<S>, command: Command) -> Result<(), RegistryError> {
    match command {
        Command::List => print_table(store.records().iter()),
        Command::Find { id } => match store.find(&id) {
            Some(record) => print_table(std::iter::once(record)),
            None => return Err(RegistryError::NotFound { id }),
        },
        Command::Search { term } => print_table(store.search(&term).into_iter()),
        Command::Add {
            id,
            name,
            address,
            budget,
        } => {
            store.add(&id, &name, &address, &budget)?;
            println!("✅ Company {} added.", id);
        }
        Command::Update {
            original_id,
            new_id,
            name,
            address,
            budget,
        } => {
            let current = store
                .find(&original_id)
                .cloned()
                .ok_or_else(|| RegistryError::NotFound {
                    id: original_id.clone(),
                })?;
            let new_id = new_id.unwrap_or(current.id);
            store.update(
                &original_id,
                &new_id,
                &name.unwrap_or(current.name),
                &address.unwrap_or(current.address),
                &budget.unwrap_or_else(|| current.budget.to_string()),
            )?;
            println!("✅ Company {} updated.", new_id);
        }
        Command::Delete { id } => {
            store.delete(&id)?;
            println!("✅ Company {} deleted.", id);
        }
        Command::Import { path } => {
            let summary = store.import(&path)?;
            println!(
                "✅ Imported {} companies from {} ({}).",
                summary.imported,
                path.display(),
                summary.binding.format.name()
            );
            if summary.skip_count() > 0 {
                println!(
                    "⚠️  Skipped {} rows with missing required fields (id, name, address).",
                    summary.skip_count()
                );
            }
        }
        Command::Export { path } => {
            let format = store.export_to(&path)?;
            println!("✅ Exported {} companies to {} ({}).", store.len(), path.display(), format.name());
        }
    }
    Ok(())
}

fn print_table<'a>(records: impl Iterator<Item = &'a CompanyRecord>) {
    println!("{:<15} {:<30} {:<30} {:>15}", "ID", "NAME", "ADDRESS", "BUDGET");
    println!("{}", "-".repeat(93));

    let mut count = 0;
    for record in records {
        println!(
            "{:<15} {:<30} {:<30} {:>15.2}",
            record.id, record.name, record.address, record.budget
        );
        count += 1;
    }

    if count == 0 {
        println!("(no companies)");
    }
}
