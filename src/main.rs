use anyhow::{anyhow, Context, Result};
use clap::{crate_version, App, AppSettings, Arg, ArgMatches, SubCommand};
use log::*;
use serde_json::{Map, Value};
use worldwise::{
    logger, position::position_query, url_position, CitiesProvider, City, CityId, Config,
    NewCity,
};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = App::new("worldwise")
        .version(crate_version!())
        .about("Keep track of the cities you have visited")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("base-url")
                .long("base-url")
                .value_name("URL")
                .help("Address of the city service")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log debug output to stderr"),
        )
        .subcommand(
            SubCommand::with_name("init")
                .about("Write the effective settings to config.yml")
                .arg(
                    Arg::with_name("force")
                        .short("f")
                        .long("force")
                        .help("Overwrite an existing config.yml"),
                ),
        )
        .subcommand(SubCommand::with_name("list").about("List all cities"))
        .subcommand(
            SubCommand::with_name("show")
                .about("Show a single city")
                .arg(Arg::with_name("ID").required(true)),
        )
        .subcommand(
            SubCommand::with_name("add")
                .about("Add a city from a JSON object")
                .arg(Arg::with_name("JSON").required(true)),
        )
        .subcommand(
            SubCommand::with_name("remove")
                .about("Remove a city")
                .arg(Arg::with_name("ID").required(true)),
        )
        .subcommand(
            SubCommand::with_name("position")
                .about("Print the map position carried by a URL")
                .arg(Arg::with_name("URL").required(true)),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(base_url) = matches.value_of("base-url") {
        config.base_url = base_url.to_owned();
    }
    if matches.is_present("verbose") {
        config.log_level = LevelFilter::Debug;
    }
    logger::init(config.log_level)?;

    if let ("init", Some(args)) = matches.subcommand() {
        return init_config(&config, args.is_present("force"));
    }

    if let ("position", Some(args)) = matches.subcommand() {
        let position = url_position(required(args, "URL")?);
        println!("lat: {}", position.lat.as_deref().unwrap_or("-"));
        println!("lng: {}", position.lng.as_deref().unwrap_or("-"));
        return Ok(());
    }

    let provider = CitiesProvider::connect(&config).await?;
    let store = provider.store();

    match matches.subcommand() {
        ("list", _) => {}
        ("show", Some(args)) => store.get_city(&id_arg(args)?).await,
        ("add", Some(args)) => {
            let details: Map<String, Value> = serde_json::from_str(required(args, "JSON")?)
                .context("City must be a JSON object")?;
            store.create_city(&NewCity::from(details)).await
        }
        ("remove", Some(args)) => store.delete_city(&id_arg(args)?).await,
        (name, _) => return Err(anyhow!("Unknown command '{}'", name)),
    }

    let state = store.snapshot().await;
    if !state.error.is_empty() {
        return Err(anyhow!(state.error));
    }

    match matches.subcommand_name() {
        Some("show") | Some("add") => {
            if let Some(city) = &state.current_city {
                print_city(city);
            }
        }
        _ => state.cities.iter().for_each(print_city),
    }

    provider.unmount();
    debug!("Done.");
    Ok(())
}

fn init_config(config: &Config, force: bool) -> Result<()> {
    let path = config
        .file_path()
        .ok_or_else(|| anyhow!("No configuration path resolved"))?;
    if path.exists() && !force {
        return Err(anyhow!(
            "{} already exists, pass --force to overwrite it",
            path.display()
        ));
    }
    config.save()?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a str> {
    args.value_of(name)
        .ok_or_else(|| anyhow!("Missing argument {}", name))
}

fn id_arg(args: &ArgMatches) -> Result<CityId> {
    Ok(CityId::from(required(args, "ID")?))
}

fn print_city(city: &City) {
    let mut line = format!(
        "{:>8}  {} {}",
        city.id,
        city.emoji().unwrap_or(" "),
        city.name().unwrap_or("(unnamed)")
    );
    if let Some(country) = city.country() {
        line.push_str(&format!(", {}", country));
    }
    if let Some(position) = city.position() {
        line.push_str(&format!("  ?{}", position_query(&position)));
    }
    println!("{}", line);
}
