//! Match Detail Page
//!
//! `/riot/match/:match_id?puuid=...`. Both parameters are required; a link
//! missing either is rejected without a request.

use leptos::*;
use leptos_router::*;

use toyproject::format;
use toyproject::riot::{match_detail_target, MatchDetail};

use crate::api;
use crate::components::Loading;

#[derive(Clone)]
enum DetailState {
    Loading,
    Loaded(MatchDetail),
    Failed(String),
}

/// One match from one player's point of view
#[component]
pub fn MatchDetailPage() -> impl IntoView {
    let params = use_params_map();
    let query = use_query_map();
    let detail = create_rw_signal(DetailState::Loading);

    create_effect(move |_| {
        let match_id = params.with(|p| p.get("match_id").cloned());
        let puuid = query.with(|q| q.get("puuid").cloned());

        let (match_id, puuid) = match match_detail_target(match_id.as_deref(), puuid.as_deref()) {
            Ok(target) => target,
            Err(e) => {
                detail.set(DetailState::Failed(e.to_string()));
                return;
            }
        };

        detail.set(DetailState::Loading);
        spawn_local(async move {
            let next = match api::match_detail(&match_id, &puuid).await {
                Ok(data) => DetailState::Loaded(data),
                Err(e) => DetailState::Failed(e.match_detail_message()),
            };
            detail.set(next);
        });
    });

    view! {
        <div class="max-w-4xl mx-auto space-y-4">
            <A href="/riot" class="inline-block px-4 py-2 bg-gray-800 rounded-lg text-gray-300 hover:text-white">
                "← Back to search"
            </A>

            {move || match detail.get() {
                DetailState::Loading => view! { <Loading label="Loading match..." /> }.into_view(),
                DetailState::Failed(message) => view! {
                    <div class="bg-gray-800 rounded-xl p-12 text-center">
                        <p class="text-red-400 text-xl font-semibold">{message}</p>
                    </div>
                }.into_view(),
                DetailState::Loaded(data) => view! { <MatchCard data=data /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn MatchCard(data: MatchDetail) -> impl IntoView {
    let header_class = if data.victory {
        "p-8 bg-gradient-to-r from-blue-600 to-blue-700"
    } else {
        "p-8 bg-gradient-to-r from-red-600 to-red-700"
    };

    view! {
        <div class="bg-gray-800 rounded-xl overflow-hidden">
            <div class=header_class>
                <div class="flex items-center justify-between">
                    <div>
                        <h1 class="text-3xl font-bold mb-2">{data.outcome_label()}</h1>
                        <p class="text-xl opacity-90">{data.riot_id()}</p>
                    </div>
                    <div class="text-right">
                        <p class="text-2xl font-bold">{data.champion_name.clone()}</p>
                        <p class="text-sm opacity-75">{data.queue_type.clone()}</p>
                    </div>
                </div>
            </div>

            <div class="p-8 border-b border-gray-700">
                <h2 class="text-lg font-semibold text-gray-300 mb-4">"Combat"</h2>
                <div class="grid grid-cols-3 gap-6 text-center">
                    <BigStat label="Kills" value=data.kills.to_string() color="text-green-400" />
                    <BigStat label="Deaths" value=data.deaths.to_string() color="text-red-400" />
                    <BigStat label="Assists" value=data.assists.to_string() color="text-blue-400" />
                </div>
                <p class="mt-4 text-center text-gray-400">
                    {format!("KDA {}", data.kda_display())}
                </p>
            </div>

            <div class="p-8 grid grid-cols-2 md:grid-cols-3 gap-6">
                <Field label="Gold" value=format::thousands(data.gold_earned) />
                <Field label="Damage" value=format::thousands(data.total_damage) />
                <Field label="CS" value=format!("{} ({:.1}/min)", data.cs, data.cs_per_minute()) />
                <Field label="Length" value=format::game_length(data.game_length) />
                <Field label="Played" value=format::post_timestamp(data.game_date) />
            </div>

            <div class="px-8 py-4 bg-gray-900/50 flex flex-wrap justify-between gap-2 text-xs text-gray-500">
                {data.match_id.clone().map(|id| view! { <span>{format!("Match ID: {}", id)}</span> })}
                {data.short_puuid().map(|p| view! { <span>{format!("PUUID: {}", p)}</span> })}
            </div>
        </div>
    }
}

#[component]
fn BigStat(label: &'static str, value: String, color: &'static str) -> impl IntoView {
    view! {
        <div>
            <div class="text-sm text-gray-400 mb-1">{label}</div>
            <div class=format!("text-4xl font-bold {}", color)>{value}</div>
        </div>
    }
}

#[component]
fn Field(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div>
            <div class="text-xs text-gray-400">{label}</div>
            <div class="font-semibold">{value}</div>
        </div>
    }
}
