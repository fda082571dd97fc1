use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use photogrid::application::{FavouritesStore, PhotoCatalogService};
use photogrid::domain::PhotoId;
use photogrid::infrastructure::{
    AppConfig, CliArgs, Command, FileRecordStore, HttpTransport, ImageLoader, MemoryImageCache,
    PicsumPhotoProvider, StorageManager,
};
use photogrid::presentation::{FavouritesViewModel, PhotoGridViewModel, ViewState};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let manager = StorageManager::new()?;
    let mut config = manager.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

struct Services {
    transport: Arc<HttpTransport>,
    catalog: Arc<PhotoCatalogService>,
    favourites: Arc<FavouritesStore>,
    images: Arc<MemoryImageCache>,
}

async fn build_services(config: &AppConfig) -> Result<Services> {
    let transport = Arc::new(HttpTransport::with_timeout(config.api.timeout_secs)?);
    let provider = PicsumPhotoProvider::with_base_url(transport.clone(), &config.api.base_url)
        .with_limit(config.api.page_limit);
    let catalog = Arc::new(PhotoCatalogService::new(Arc::new(provider)));

    let favourites_path = config
        .effective_favourites_path()
        .ok_or_else(|| eyre!("failed to determine favourites file location"))?;
    let records = FileRecordStore::open(&favourites_path)
        .await
        .wrap_err_with(|| format!("failed to open {}", favourites_path.display()))?;
    let favourites = Arc::new(FavouritesStore::new(Arc::new(records)));

    let images = Arc::new(MemoryImageCache::new(config.images.cache_capacity));

    Ok(Services {
        transport,
        catalog,
        favourites,
        images,
    })
}

fn print_list(state: &ViewState, empty_message: &str) -> Result<()> {
    match state {
        ViewState::Ready { photos } => {
            for photo in photos.iter() {
                println!(
                    "{:>6}  {:<28} {:>5}x{:<5} {}",
                    photo.id().as_str(),
                    photo.author(),
                    photo.width(),
                    photo.height(),
                    photo.small_image_url()
                );
            }
            Ok(())
        }
        ViewState::Empty => {
            println!("{empty_message}");
            Ok(())
        }
        ViewState::Error(error) => Err(eyre!(
            "{} {} ({})",
            error.header_text(),
            error.description_text(),
            error.error()
        )),
        ViewState::Loading => Ok(()),
    }
}

async fn run(command: Command, services: Services) -> Result<()> {
    match command {
        Command::Photos => {
            let mut grid = PhotoGridViewModel::new(services.catalog, services.favourites);
            grid.fetch_photo_grid().await;
            print_list(grid.view_state(), "No photos available.")?;
        }
        Command::Favourites => {
            let mut favourites = FavouritesViewModel::new(services.catalog, services.favourites);
            favourites.load_favourites().await;
            print_list(favourites.view_state(), "No favourites yet.")?;
        }
        Command::Favourite { id } => {
            services.favourites.add(&PhotoId::new(id.as_str())).await;
            println!("Added {id} to favourites.");
        }
        Command::Unfavourite { id } => {
            services.favourites.remove(&PhotoId::new(id.as_str())).await;
            println!("Removed {id} from favourites.");
        }
        Command::Image { id, full } => {
            let photos = services.catalog.fetch_photos().await?;
            let photo = photos
                .iter()
                .find(|photo| photo.id().as_str() == id)
                .ok_or_else(|| eyre!("no photo with id {id}"))?;
            let url = if full {
                photo.big_image_url()
            } else {
                photo.small_image_url()
            };

            let loader = ImageLoader::new(services.images.clone(), services.transport);
            let image = loader
                .load(Some(&url))
                .await
                .ok_or_else(|| eyre!("image unavailable: {:?}", loader.status()))?;
            println!(
                "{}x{} ({} bytes) {}",
                image.width,
                image.height,
                image.len(),
                image.url
            );
            info!(stats = %services.images.stats(), "Image loaded");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    info!(version = photogrid::VERSION, "Starting PhotoGrid");

    let services = build_services(&config).await?;
    run(args.command, services).await
}
