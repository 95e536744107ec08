use std::env;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use foundation::math::GeoPoint;
use geocoding::{
    AddressForm, Candidate, GoogleProvider, HttpResolver, LocationResolver, NominatimProvider,
    Provider, StaticResolver,
};
use massing::{BuildingInputs, BuildingModel, LotParameters, UniformLotEstimator, generate};
use reqwest::Client;
use scene::WorldSceneHost;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wizard::{WizardConfig, WizardController};

#[derive(Parser, Debug)]
#[command(author, version, about = "Address to massing model, from the terminal")]
struct Args {
    /// Geocoding provider (env GEOCODER_PROVIDER, default nominatim)
    #[arg(long, value_enum)]
    provider: Option<ProviderKind>,

    /// Google Geocoding API key (env GOOGLE_MAPS_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Nominatim search endpoint (env NOMINATIM_URL)
    #[arg(long)]
    nominatim_url: Option<String>,

    /// HTTP timeout for geocoding requests, in seconds
    #[arg(long, default_value_t = 10)]
    timeout_s: u64,

    /// Wizard config as JSON (missing fields use defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ProviderKind {
    Google,
    Nominatim,
}

#[derive(ClapArgs, Debug, Clone)]
struct AddressArgs {
    /// Street address
    #[arg(long)]
    line: String,

    #[arg(long, default_value = "")]
    city: String,

    /// State or region
    #[arg(long, default_value = "")]
    region: String,

    #[arg(long, default_value = "")]
    postal_code: String,

    #[arg(long, default_value = "")]
    country: String,
}

impl AddressArgs {
    fn into_form(self) -> AddressForm {
        AddressForm {
            line: self.line,
            city: self.city,
            region: self.region,
            postal_code: self.postal_code,
            country: self.country,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a model for a known lot size
    Generate {
        /// Lot area in square meters
        #[arg(long)]
        lot_area: f64,

        /// Floor-area ratio (default from config)
        #[arg(long)]
        far: Option<f64>,

        /// Number of floors (default from config)
        #[arg(long)]
        floors: Option<i64>,

        /// Print the full model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look up an address and list the candidates
    Resolve {
        #[command(flatten)]
        address: AddressArgs,

        #[arg(long)]
        json: bool,
    },

    /// Run the whole wizard: search, pick a candidate, generate, optionally update
    Wizard {
        #[command(flatten)]
        address: AddressArgs,

        /// Marker label of the candidate to pick (1-based)
        #[arg(long, default_value = "1")]
        select: String,

        /// Seed for the lot estimate
        #[arg(long)]
        seed: Option<u64>,

        /// Floor-area ratio to apply after the first model
        #[arg(long)]
        far: Option<String>,

        /// Floor count to apply after the first model
        #[arg(long)]
        floors: Option<String>,

        /// Skip geocoding and place the address at LAT,LON
        #[arg(long, value_parser = parse_lat_lon)]
        offline: Option<GeoPoint>,

        /// Frames to run the scene loop for
        #[arg(long, default_value_t = 60)]
        frames: u32,

        /// Print the final wizard state as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;

    match &args.command {
        Command::Generate {
            lot_area,
            far,
            floors,
            json,
        } => run_generate(&config, *lot_area, *far, *floors, *json)?,
        Command::Resolve { address, json } => {
            let resolver = http_resolver(&args)?;
            run_resolve(&resolver, address.clone().into_form(), *json).await?
        }
        Command::Wizard {
            address,
            select,
            seed,
            far,
            floors,
            offline,
            frames,
            json,
        } => {
            let form = address.clone().into_form();
            let resolver: Box<dyn LocationResolver> = match offline {
                Some(at) => Box::new(StaticResolver::always(vec![Candidate::new(
                    form.query(),
                    *at,
                )])),
                None => Box::new(http_resolver(&args)?),
            };
            let estimator = match seed {
                Some(seed) => UniformLotEstimator::seeded(*seed),
                None => UniformLotEstimator::from_entropy(),
            };
            let mut wizard = WizardController::new(config, WorldSceneHost::new(), estimator);
            run_wizard(
                &mut wizard,
                resolver.as_ref(),
                form,
                select,
                far.as_deref(),
                floors.as_deref(),
                *frames,
            )
            .await?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&wizard.view())?);
            }
            wizard.reset();
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<WizardConfig, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => WizardConfig::default(),
    };
    if let Some(far) = env::var("MASSING_DEFAULT_FAR")
        .ok()
        .and_then(|v| v.parse().ok())
    {
        config.default_inputs.floor_area_ratio = far;
    }
    if let Some(floors) = env::var("MASSING_DEFAULT_FLOORS")
        .ok()
        .and_then(|v| v.parse().ok())
    {
        config.default_inputs.floor_count = floors;
    }
    config.validate()?;
    Ok(config)
}

fn provider_from_env(args: &Args) -> Result<Provider, Box<dyn std::error::Error>> {
    let kind = match args.provider {
        Some(kind) => kind,
        None => {
            let name = env::var("GEOCODER_PROVIDER").unwrap_or_else(|_| "nominatim".to_string());
            ProviderKind::from_str(&name, true)
                .map_err(|_| format!("unknown GEOCODER_PROVIDER {name:?}"))?
        }
    };
    let api_key = args
        .api_key
        .clone()
        .or_else(|| env::var("GOOGLE_MAPS_API_KEY").ok());
    let nominatim_url = args
        .nominatim_url
        .clone()
        .or_else(|| env::var("NOMINATIM_URL").ok());
    Ok(build_provider(kind, api_key, nominatim_url)?)
}

fn build_provider(
    kind: ProviderKind,
    api_key: Option<String>,
    nominatim_url: Option<String>,
) -> Result<Provider, String> {
    match kind {
        ProviderKind::Google => {
            let key = api_key
                .ok_or("google provider needs --api-key or GOOGLE_MAPS_API_KEY")?;
            Ok(Provider::Google(GoogleProvider::new(key)))
        }
        ProviderKind::Nominatim => {
            let mut provider = NominatimProvider::default();
            if let Some(url) = nominatim_url {
                provider.base_url = url;
            }
            Ok(Provider::Nominatim(provider))
        }
    }
}

fn http_resolver(args: &Args) -> Result<HttpResolver<Provider>, Box<dyn std::error::Error>> {
    let provider = provider_from_env(args)?;
    let client = Client::builder()
        .timeout(Duration::from_secs(args.timeout_s))
        .build()?;
    Ok(HttpResolver::with_client(client, provider))
}

fn parse_lat_lon(s: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got {s:?}"))?;
    let lat: f64 = lat.trim().parse().map_err(|_| format!("bad latitude {lat:?}"))?;
    let lon: f64 = lon.trim().parse().map_err(|_| format!("bad longitude {lon:?}"))?;
    let point = GeoPoint::new(lat, lon);
    if !point.is_valid() {
        return Err(format!("coordinates out of range: {s}"));
    }
    Ok(point)
}

fn run_generate(
    config: &WizardConfig,
    lot_area: f64,
    far: Option<f64>,
    floors: Option<i64>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let defaults = config.default_inputs;
    let inputs = BuildingInputs::new(
        far.unwrap_or(defaults.floor_area_ratio),
        floors.unwrap_or(defaults.floor_count as i64),
    )?;
    let params = LotParameters::with_inputs(lot_area, inputs)?;
    let model = generate(&params);
    if json {
        println!("{}", serde_json::to_string_pretty(&model)?);
    } else {
        print_model(&model);
    }
    Ok(())
}

async fn run_resolve(
    resolver: &dyn LocationResolver,
    form: AddressForm,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let query = form.query();
    info!("resolving {query}");
    let candidates = resolver.resolve(&query).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }
    for (i, c) in candidates.iter().enumerate() {
        println!(
            "{:>2}. {}  ({:.6}, {:.6})",
            i + 1,
            c.formatted_address,
            c.location.lat_deg,
            c.location.lon_deg
        );
    }
    Ok(())
}

async fn run_wizard(
    wizard: &mut WizardController<WorldSceneHost, UniformLotEstimator>,
    resolver: &dyn LocationResolver,
    form: AddressForm,
    select: &str,
    far: Option<&str>,
    floors: Option<&str>,
    frames: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}: enter an address", wizard.step().label());
    let candidates = wizard.submit_address(form, resolver).await?;
    println!("found {} candidate(s)", candidates.len());
    for (i, c) in candidates.iter().enumerate() {
        println!("{:>2}. {}", i + 1, c.formatted_address);
    }

    println!("{}: select an address", wizard.step().label());
    let selection = wizard.select_marker(select)?;
    println!(
        "selected {} (estimated lot {:.0} m2)",
        selection.candidate.formatted_address, selection.lot_area_m2
    );

    wizard.proceed_to_model()?;
    println!("{}: massing model", wizard.step().label());
    if let Some(model) = wizard.model() {
        print_model(model);
    }

    if far.is_some() || floors.is_some() {
        let current = wizard.inputs();
        let far = far.map_or_else(|| current.floor_area_ratio.to_string(), str::to_string);
        let floors = floors.map_or_else(|| current.floor_count.to_string(), str::to_string);
        let pending = wizard.begin_parameter_update_text(&far, &floors)?;
        println!("updating...");
        tokio::time::sleep(wizard.config().busy_delay()).await;
        let model = wizard.finish_parameter_update(pending)?;
        print_model(model);
    }

    let mut drawn = 0;
    for _ in 0..frames {
        match wizard.host_mut().tick() {
            Some(stats) => drawn = stats.draw_items,
            None => {
                warn!("scene loop is not running");
                break;
            }
        }
    }
    info!(frames, draw_items = drawn, "scene loop finished");
    Ok(())
}

fn print_model(model: &BuildingModel) {
    println!(
        "lot side {:.2} m, footprint {:.2} m, {} floor(s), {} window(s), {:.0} m2 gross",
        model.lot_side_length,
        model.footprint_side_length,
        model.floor_count(),
        model.window_count(),
        model.gross_floor_area()
    );
    for floor in &model.floors {
        println!(
            "  floor {:>2}: side {:>6.2} m at {:>5.1} m, {} window(s) per side",
            floor.index,
            floor.side_length,
            floor.vertical_offset,
            floor.windows_per_side()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{ProviderKind, build_provider, parse_lat_lon, run_wizard};
    use foundation::math::GeoPoint;
    use geocoding::{AddressForm, Candidate, GeocodeProvider, Provider, StaticResolver};
    use massing::UniformLotEstimator;
    use scene::WorldSceneHost;
    use wizard::{Step, WizardConfig, WizardController};

    #[test]
    fn parses_lat_lon_pairs() {
        assert_eq!(
            parse_lat_lon("39.8, -89.64").unwrap(),
            GeoPoint::new(39.8, -89.64)
        );
        assert!(parse_lat_lon("39.8").is_err());
        assert!(parse_lat_lon("95,0").is_err());
    }

    #[test]
    fn google_needs_a_key() {
        assert!(build_provider(ProviderKind::Google, None, None).is_err());
        let provider = build_provider(ProviderKind::Google, Some("k".into()), None).unwrap();
        assert_eq!(provider.name(), "google");
    }

    #[test]
    fn nominatim_url_can_be_overridden() {
        let provider = build_provider(
            ProviderKind::Nominatim,
            None,
            Some("http://localhost:8080/search".into()),
        )
        .unwrap();
        match provider {
            Provider::Nominatim(p) => assert_eq!(p.base_url, "http://localhost:8080/search"),
            other => panic!("unexpected provider {other:?}"),
        }
    }

    #[tokio::test]
    async fn offline_wizard_reaches_model_view_and_applies_update() {
        let resolver = StaticResolver::always(vec![Candidate::new(
            "1 Main St",
            GeoPoint::new(39.8, -89.64),
        )]);
        let config = WizardConfig {
            busy_delay_ms: 0,
            ..WizardConfig::default()
        };
        let mut wizard = WizardController::new(
            config,
            WorldSceneHost::new(),
            UniformLotEstimator::seeded(7),
        );
        let form = AddressForm {
            line: "1 Main St".into(),
            ..AddressForm::default()
        };

        run_wizard(&mut wizard, &resolver, form, "1", None, Some("6"), 3)
            .await
            .unwrap();

        assert_eq!(wizard.step(), Step::ModelView);
        assert_eq!(wizard.model().map(|m| m.floor_count()), Some(6));
        assert_eq!(wizard.host().snapshot().map(|s| s.frame_index), Some(3));
    }
}
