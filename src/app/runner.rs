use futures_util::future::try_join_all;
use tracing::info;

use crate::api::{
    BlobTimingRow, BlockFirstSeenRow, FilterSpec, NodeRow, RetryPolicy, StateSizeRow, XatuClient,
};
use crate::args::{Cli, Command, SlotWindowArgs, StateGrowthArgs};
use crate::charts;
use crate::config::{Settings, load_config, resolve_settings};
use crate::error::{ApiError, AppError, AppResult, ValidationError};
use crate::geo::build_geo_summary;
use crate::series::{
    AVERAGE_COLOR, GrowthPoint, GrowthSeries, build_node_latency_series, build_preagg_series,
    compute_growth_delta,
};
use crate::sinks::write_json;

use super::gate;
use super::summary;

pub const BLOCK_FIRST_SEEN_TABLE: &str = "fct_block_first_seen_by_node";
pub const BLOB_TIMING_TABLE: &str = "fct_blob_first_seen_stats";
pub const STATE_SIZE_TABLE: &str = "fct_state_size_daily";
pub const NODES_TABLE: &str = "fct_nodes_geo";

/// Runs the selected view. In-flight requests are abandoned on ctrl-c; a
/// dropped fetch future never reaches the aggregation stage.
///
/// # Errors
///
/// Returns configuration, fetch, chart and sink errors from the view.
pub async fn run(cli: Cli) -> AppResult<()> {
    let file = load_config(cli.config.as_deref())?;
    let settings = resolve_settings(&cli, file.as_ref())?;
    let client = XatuClient::new(&settings.endpoint, RetryPolicy::none())?;

    tokio::select! {
        result = dispatch(&cli.command, &settings, &client) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted; in-flight requests abandoned.");
            Ok(())
        }
    }
}

async fn dispatch(command: &Command, settings: &Settings, client: &XatuClient) -> AppResult<()> {
    match command {
        Command::Latency(args) => run_latency(args, settings, client).await,
        Command::BlobTiming(args) => run_blob_timing(args, settings, client).await,
        Command::StateGrowth(args) => run_state_growth(args, settings, client).await,
        Command::Geo => run_geo(settings, client).await,
    }
}

/// Feature/network gate: a disabled view is a configuration condition, not
/// an error.
async fn view_allowed(client: &XatuClient, settings: &Settings, path: &str) -> AppResult<bool> {
    let config = client.network_config().await?;
    if !gate::view_enabled(&config, path, &settings.network) {
        info!(
            path,
            network = settings.network,
            "view is not enabled for this network; nothing to do"
        );
        return Ok(false);
    }
    Ok(true)
}

async fn resolve_slot_window(
    args: &SlotWindowArgs,
    table: &str,
    client: &XatuClient,
) -> AppResult<(u64, u64)> {
    let (start, end) = if let (Some(start), Some(end)) = (args.start_slot, args.end_slot) {
        (start, end)
    } else {
        let bounds = client.table_bounds(table).await?;
        let max = bounds.max_slot.ok_or_else(|| {
            AppError::api(ApiError::BoundsUnavailable {
                table: table.to_owned(),
            })
        })?;
        let min = bounds.min_slot.unwrap_or(0);
        let start = args
            .start_slot
            .unwrap_or_else(|| max.saturating_sub(args.slot_window).max(min));
        (start, args.end_slot.unwrap_or(max))
    };
    if start > end {
        return Err(AppError::validation(ValidationError::InvalidSlotRange {
            start,
            end,
        }));
    }
    Ok((start, end))
}

async fn run_latency(
    args: &SlotWindowArgs,
    settings: &Settings,
    client: &XatuClient,
) -> AppResult<()> {
    let client = client.clone().with_retry_policy(settings.retry.latency);
    if !view_allowed(&client, settings, gate::LATENCY_PATH).await? {
        return Ok(());
    }
    let (start, end) = resolve_slot_window(args, BLOCK_FIRST_SEEN_TABLE, &client).await?;
    let filter = FilterSpec::new()
        .where_eq("meta_network_name", &settings.network)
        .where_gte("slot", start)
        .where_lte("slot", end)
        .order_by("slot asc")
        .page_size(settings.page_size);
    let rows: Vec<BlockFirstSeenRow> = client
        .fetch_all_rows(BLOCK_FIRST_SEEN_TABLE, &filter)
        .await?;
    info!(rows = rows.len(), start, end, "latency rows fetched");

    let set = build_node_latency_series(&rows, &settings.palette);
    if set.series.is_empty() {
        info!("No data for this range/filter.");
        return Ok(());
    }
    charts::plot_series_set(
        &set,
        "Block first seen latency",
        "Latency (ms)",
        &settings.output_dir.join("latency.png"),
    )?;
    write_json(
        "latency series",
        &settings.output_dir.join("latency.json"),
        &set,
    )
    .await?;
    summary::log_series_set("latency", &set);
    Ok(())
}

async fn run_blob_timing(
    args: &SlotWindowArgs,
    settings: &Settings,
    client: &XatuClient,
) -> AppResult<()> {
    let client = client.clone().with_retry_policy(settings.retry.blob_timing);
    if !view_allowed(&client, settings, gate::BLOB_TIMING_PATH).await? {
        return Ok(());
    }
    let (start, end) = resolve_slot_window(args, BLOB_TIMING_TABLE, &client).await?;
    let filter = FilterSpec::new()
        .where_eq("meta_network_name", &settings.network)
        .where_gte("slot", start)
        .where_lte("slot", end)
        .order_by("slot asc")
        .page_size(settings.page_size);
    let rows: Vec<BlobTimingRow> = client.fetch_all_rows(BLOB_TIMING_TABLE, &filter).await?;
    info!(rows = rows.len(), start, end, "blob timing rows fetched");

    let enriched = build_preagg_series(&rows, &settings.palette);
    if enriched.series.is_empty() {
        info!("No data for this range/filter.");
        return Ok(());
    }
    let set = enriched.to_series_set();
    charts::plot_series_set(
        &set,
        "Blob first seen (median)",
        "Latency (ms)",
        &settings.output_dir.join("blob_timing.png"),
    )?;
    // The enriched export keeps the min/max/avg tooltip metadata the chart
    // image cannot carry.
    write_json(
        "blob timing series",
        &settings.output_dir.join("blob_timing.json"),
        &enriched,
    )
    .await?;
    summary::log_series_set("blob-timing", &set);
    Ok(())
}

async fn run_state_growth(
    args: &StateGrowthArgs,
    settings: &Settings,
    client: &XatuClient,
) -> AppResult<()> {
    let client = client
        .clone()
        .with_retry_policy(settings.retry.state_growth);
    if !view_allowed(&client, settings, gate::STATE_GROWTH_PATH).await? {
        return Ok(());
    }

    // One query per expiry policy, issued concurrently and joined before any
    // aggregation; partial results are never aggregated early.
    let page_size = settings.page_size;
    let fetches = settings.expiry_policies.iter().map(|policy| {
        let client = &client;
        let network = &settings.network;
        async move {
            let filter = FilterSpec::new()
                .where_eq("meta_network_name", network)
                .where_eq("expiry_policy", policy)
                .order_by("date asc")
                .page_size(page_size);
            let rows: Vec<StateSizeRow> = client.fetch_all_rows(STATE_SIZE_TABLE, &filter).await?;
            Ok::<_, AppError>((policy.as_str(), rows))
        }
    });
    let results = try_join_all(fetches).await?;

    let colors = settings
        .palette
        .assign(results.iter().map(|(policy, _)| *policy));
    let series: Vec<GrowthSeries> = results
        .iter()
        .map(|(policy, rows)| {
            let mut points: Vec<GrowthPoint> = rows
                .iter()
                .filter_map(|row| match (row.date, row.size_bytes) {
                    (Some(date), Some(value)) => Some(GrowthPoint { date, value }),
                    _ => None,
                })
                .collect();
            points.sort_by_key(|point| point.date);
            GrowthSeries {
                name: (*policy).to_owned(),
                color: colors.get(policy).copied().unwrap_or(AVERAGE_COLOR),
                points,
            }
        })
        .collect();

    if series.iter().all(|entry| entry.points.is_empty()) {
        info!("No data for this range/filter.");
        return Ok(());
    }

    for entry in &series {
        summary::log_growth(
            &entry.name,
            compute_growth_delta(&entry.points, args.timeframe).as_ref(),
        );
    }
    let delta = series
        .first()
        .and_then(|entry| compute_growth_delta(&entry.points, args.timeframe));

    charts::plot_state_growth(
        &series,
        delta.as_ref(),
        &settings.output_dir.join("state_growth.png"),
    )?;
    write_json(
        "state growth series",
        &settings.output_dir.join("state_growth.json"),
        &series,
    )
    .await?;
    if let Some(delta) = &delta {
        write_json(
            "state growth delta",
            &settings.output_dir.join("state_growth_delta.json"),
            delta,
        )
        .await?;
    }
    Ok(())
}

async fn run_geo(settings: &Settings, client: &XatuClient) -> AppResult<()> {
    let client = client.clone().with_retry_policy(settings.retry.geo);
    if !view_allowed(&client, settings, gate::GEO_PATH).await? {
        return Ok(());
    }
    let filter = FilterSpec::new()
        .where_eq("meta_network_name", &settings.network)
        .page_size(settings.page_size);
    let rows: Vec<NodeRow> = client.fetch_all_rows(NODES_TABLE, &filter).await?;
    if rows.is_empty() {
        info!("No data for this range/filter.");
        return Ok(());
    }
    let geo = build_geo_summary(&rows, &settings.fallback_continent);
    write_json("geo summary", &settings.output_dir.join("geo.json"), &geo).await?;
    summary::log_geo(&geo);
    Ok(())
}
