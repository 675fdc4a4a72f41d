//! Match History Page
//!
//! Riot id search, the player summary card and the expandable match list.

use leptos::*;
use leptos_router::*;

use toyproject::format;
use toyproject::riot::{
    match_detail_link, MatchSearch, MatchSummary, PlayerMatches, SearchPhase,
};

use crate::api;
use crate::components::{InlineLoading, Loading};
use crate::state::global::use_global_state;

/// Match history search page
#[component]
pub fn Riot() -> impl IntoView {
    let state = use_global_state();
    let search = create_rw_signal(MatchSearch::new());

    let run_search = move || {
        let query = match search.try_update(MatchSearch::begin) {
            Some(Ok(query)) => query,
            Some(Err(e)) => {
                state.show_error(&e.to_string());
                return;
            }
            None => return,
        };

        spawn_local(async move {
            let outcome = api::player_matches(&query)
                .await
                .map_err(|e| e.lookup_message());
            search.update(|s| s.finish(outcome));
        });
    };

    let on_key = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" {
            run_search();
        }
    };

    view! {
        <div class="max-w-4xl mx-auto space-y-6">
            <section class="bg-gray-800 rounded-xl p-8">
                <h1 class="text-3xl font-bold mb-6">"Match History"</h1>

                <div class="flex gap-3">
                    <input
                        type="text"
                        placeholder="Game name (e.g. Faker)"
                        prop:value=move || search.with(|s| s.game_name.clone())
                        on:input=move |ev| search.update(|s| s.game_name = event_target_value(&ev))
                        on:keydown=on_key
                        class="flex-1 bg-gray-700 rounded-lg px-4 py-3 border border-gray-600 focus:border-blue-500 focus:outline-none"
                    />
                    <input
                        type="text"
                        placeholder="Tag (e.g. KR1)"
                        prop:value=move || search.with(|s| s.tag_line.clone())
                        on:input=move |ev| search.update(|s| s.tag_line = event_target_value(&ev))
                        on:keydown=on_key
                        class="w-32 bg-gray-700 rounded-lg px-4 py-3 border border-gray-600 focus:border-blue-500 focus:outline-none"
                    />
                    <button
                        on:click=move |_| run_search()
                        disabled=move || search.with(MatchSearch::is_loading)
                        class="px-6 py-3 bg-blue-600 hover:bg-blue-700 disabled:bg-gray-600 rounded-lg font-medium flex items-center gap-2"
                    >
                        {move || if search.with(MatchSearch::is_loading) {
                            view! { <InlineLoading /> <span>"Searching..."</span> }.into_view()
                        } else {
                            view! { <span>"Search"</span> }.into_view()
                        }}
                    </button>
                </div>

                {move || search.with(|s| s.error().map(str::to_string)).map(|msg| view! {
                    <div class="mt-4 p-4 bg-red-900/40 border border-red-700 rounded-lg text-red-300">
                        {msg}
                    </div>
                })}
            </section>

            {move || match search.with(MatchSearch::phase) {
                SearchPhase::Loading => view! { <Loading label="Searching..." /> }.into_view(),
                SearchPhase::Loaded => search
                    .with(|s| s.result().cloned())
                    .map(|data| view! { <SearchResult data=data search=search /> })
                    .into_view(),
                SearchPhase::Idle => view! { <SearchHint /> }.into_view(),
                SearchPhase::Failed => ().into_view(),
            }}
        </div>
    }
}

#[component]
fn SearchHint() -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-12 text-center text-gray-400">
            <h3 class="text-xl font-semibold text-gray-200 mb-2">"Search for a player"</h3>
            <p>"Enter a game name and tag to see recent matches."</p>
            <p class="mt-4 text-sm text-gray-500">"Example: Faker #KR1"</p>
        </section>
    }
}

#[component]
fn SearchResult(data: PlayerMatches, search: RwSignal<MatchSearch>) -> impl IntoView {
    let stats = data.stats;
    let puuid = data.player.puuid.clone();
    let riot_id = data.player.riot_id();
    let matches = data.matches;

    view! {
        <section class="bg-gray-800 rounded-xl p-8">
            <div class="flex items-center justify-between mb-6">
                <h2 class="text-2xl font-bold">{riot_id}</h2>
                <span class="text-sm text-gray-400">
                    {format!("Last {} games", stats.total_games)}
                </span>
            </div>

            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                <StatTile
                    label="Win rate"
                    value=stats.win_rate_display()
                    detail=format!("{}W {}L", stats.wins, stats.losses)
                />
                <StatTile
                    label="Average KDA"
                    value=format!("{:.2}", stats.average_kda)
                    detail=stats.average_per_game().to_string()
                />
                <StatTile
                    label="Most played"
                    value=stats.most_played_champion.clone().unwrap_or_else(|| "-".to_string())
                    detail=String::new()
                />
                <StatTile
                    label="Rating"
                    value=stats.skill_rating().label().to_string()
                    detail=String::new()
                />
            </div>
        </section>

        <section class="bg-gray-800 rounded-xl p-6">
            <h3 class="text-xl font-bold mb-4">"Recent matches"</h3>
            {if matches.is_empty() {
                view! { <p class="text-gray-400">"No recent matches."</p> }.into_view()
            } else {
                view! {
                    <div class="space-y-3">
                        <For
                            each=move || matches.clone()
                            key=|m| m.match_id.clone()
                            children=move |m| view! {
                                <MatchRow summary=m search=search puuid=puuid.clone() />
                            }
                        />
                    </div>
                }.into_view()
            }}
        </section>
    }
}

#[component]
fn StatTile(label: &'static str, value: String, detail: String) -> impl IntoView {
    view! {
        <div class="bg-gray-700 p-4 rounded-lg">
            <div class="text-sm text-gray-400 mb-2">{label}</div>
            <div class="text-2xl font-bold">{value}</div>
            <div class="text-xs text-gray-400 mt-1">{detail}</div>
        </div>
    }
}

/// Summary line, plus the detail grid while expanded
#[component]
fn MatchRow(
    summary: MatchSummary,
    search: RwSignal<MatchSearch>,
    puuid: Option<String>,
) -> impl IntoView {
    let match_id = summary.match_id.clone();
    let expanded = {
        let match_id = match_id.clone();
        move || search.with(|s| s.is_expanded(&match_id))
    };
    let toggle = {
        let match_id = match_id.clone();
        move |_| {
            search.update(|s| {
                s.toggle(&match_id);
            })
        }
    };

    let row_class = if summary.victory {
        "p-4 cursor-pointer bg-blue-900/30"
    } else {
        "p-4 cursor-pointer bg-red-900/30"
    };
    let outcome_class = if summary.victory {
        "text-xl font-bold text-blue-400"
    } else {
        "text-xl font-bold text-red-400"
    };
    let relative = format::relative_time(summary.game_date, chrono::Utc::now());
    let detail_href = puuid.map(|p| match_detail_link(&match_id, &p));

    let details = store_value(summary.clone());

    view! {
        <div class="border border-gray-700 rounded-lg overflow-hidden">
            <div on:click=toggle class=row_class>
                <div class="flex items-center justify-between">
                    <div class="flex items-center gap-4">
                        <div class=outcome_class>{summary.outcome_label()}</div>
                        <div>
                            <div class="font-bold">{summary.champion_name.clone()}</div>
                            <div class="text-sm text-gray-400">
                                {format!("{} / {} / {}", summary.kills, summary.deaths, summary.assists)}
                                <span class="ml-2">{format!("(KDA {})", summary.kda_display())}</span>
                            </div>
                        </div>
                    </div>
                    <div class="text-right text-sm">
                        <div>{summary.queue_type.clone()}</div>
                        <div class="text-gray-400">{relative}</div>
                    </div>
                </div>
            </div>

            {move || expanded().then(|| {
                let m = details.get_value();
                view! {
                    <div class="p-4 border-t border-gray-700 grid grid-cols-2 md:grid-cols-3 gap-4">
                        <Detail label="Gold" value=format::thousands(m.gold_earned) />
                        <Detail label="Damage" value=format::thousands(m.total_damage) />
                        <Detail label="CS" value=format!("{} ({:.1}/min)", m.cs, m.cs_per_minute()) />
                        <Detail label="Length" value=format::game_length(m.game_length) />
                        <Detail label="Date" value=format::match_date(m.game_date) />
                        {detail_href.clone().map(|href| view! {
                            <A href=href class="text-blue-400 hover:underline self-center">"Full details"</A>
                        })}
                    </div>
                }
            })}
        </div>
    }
}

#[component]
fn Detail(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div>
            <div class="text-xs text-gray-400">{label}</div>
            <div class="font-semibold">{value}</div>
        </div>
    }
}
