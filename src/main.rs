use std::pin::pin;
use std::time::Duration;

use clap::Parser;
use futures_util::StreamExt;
use uniqlist::{
    AnalysisClient, AnalysisSession, PhraseClassifier, SessionEvent, TRACK_COUNT_BUCKETS, validate,
};

#[derive(Parser)]
#[command(
    name = "uniqlist",
    about = "How unique is your playlist?",
    long_about = "Submit a playlist to the uniqlist analysis service and wait for its\n\
    uniqueness score.\n\n\
    Examples:\n\
      uniqlist https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M\n\
      uniqlist --api http://analysis.local:8000 <playlist-url>\n\
      uniqlist --json <playlist-url>                # machine-readable report\n\
      uniqlist -c <playlist-url>                    # validate the link only"
)]
struct Args {
    /// Playlist URL to analyze
    #[arg(help = "Playlist URL to analyze (e.g. https://open.spotify.com/playlist/<id>)")]
    url: String,

    /// Analysis service base URL
    #[arg(long = "api", default_value = "http://localhost:8000", help = "Analysis service base URL")]
    api: String,

    /// Milliseconds between status checks
    #[arg(long = "interval", default_value_t = 1500, help = "Milliseconds between status checks")]
    interval: u64,

    /// Print the final report as JSON
    #[arg(long = "json", help = "Print the final report as JSON")]
    json: bool,

    /// Validate the URL locally and exit without contacting the service
    #[arg(
        short = 'c',
        long = "check-only",
        help = "Validate the URL locally and exit without contacting the service"
    )]
    check_only: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("uniqlist=info".parse().expect("valid log directive")),
        )
        .init();

    let args = Args::parse();

    if args.check_only {
        match validate(&args.url) {
            Ok(reference) => {
                println!(
                    "{} playlist {}",
                    reference.provider().name,
                    reference.external_id()
                );
                return;
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    let client = match AnalysisClient::new(&args.api) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let session =
        AnalysisSession::new(client).poll_interval(Duration::from_millis(args.interval));

    // Ctrl-C stops the polling loop; the session then ends without a result
    let cancel = session.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let mut rng = rand::thread_rng();
    let mut finished = false;
    let mut events = pin!(session.events(args.url.clone()));
    while let Some(event) = events.next().await {
        match event {
            SessionEvent::Validating => println!("Checking playlist link..."),
            SessionEvent::Submitting(reference) => println!(
                "Submitting {} playlist {} for analysis...",
                reference.provider().name,
                reference.external_id()
            ),
            SessionEvent::Polling(job) => {
                println!(
                    "Analyzing \"{}\" by {} ({} tracks)",
                    job.info.name, job.info.owner, job.info.tracks_count
                );
                let tracks = PhraseClassifier::new(TRACK_COUNT_BUCKETS);
                if let Ok(commentary) = tracks.classify(job.info.tracks_count as f64, &mut rng) {
                    println!("{}", commentary.phrase);
                }
                println!("This can take a little while...");
            }
            SessionEvent::Ready(report) => {
                finished = true;
                if args.json {
                    match serde_json::to_string_pretty(&report) {
                        Ok(rendered) => println!("{}", rendered),
                        Err(e) => {
                            eprintln!("Error: {}", e);
                            std::process::exit(1);
                        }
                    }
                } else {
                    println!();
                    println!("Uniqueness: {} / 100", report.display);
                    println!("{}", report.phrase);
                }
            }
            SessionEvent::Errored(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    if !finished {
        eprintln!("Cancelled.");
        std::process::exit(130);
    }
}
