//! Board Page
//!
//! The in-memory discussion board. Posts live in a signal seeded at mount
//! and are gone after a reload.

use leptos::*;

use toyproject::board::{Board, Post, PostDraft, PostEdit, PostId};
use toyproject::format;

use crate::state::global::{use_global_state, GlobalState};

#[derive(Clone, Copy, PartialEq)]
enum BoardView {
    List,
    Detail(PostId),
    Write,
}

/// Board list, post detail and write form
#[component]
pub fn BoardPage() -> impl IntoView {
    let board = create_rw_signal(Board::seeded(chrono::Utc::now()));
    let view_mode = create_rw_signal(BoardView::List);

    view! {
        <div class="max-w-4xl mx-auto">
            {move || match view_mode.get() {
                BoardView::List => view! { <PostList board=board view_mode=view_mode /> }.into_view(),
                BoardView::Detail(id) => view! { <PostView id=id board=board view_mode=view_mode /> }.into_view(),
                BoardView::Write => view! { <WriteForm board=board view_mode=view_mode /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn PostList(board: RwSignal<Board>, view_mode: RwSignal<BoardView>) -> impl IntoView {
    let state = use_global_state();
    let (term, set_term) = create_signal(String::new());

    let visible = move || {
        board.with(|b| {
            b.search(&term.get())
                .into_iter()
                .cloned()
                .collect::<Vec<Post>>()
        })
    };

    let open = move |id: PostId| {
        let opened = board.try_update(|b| b.open(id).map(|_| ()));
        match opened {
            Some(Ok(())) => view_mode.set(BoardView::Detail(id)),
            Some(Err(e)) => state.show_board_error(&e),
            None => {}
        }
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-4">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">"Board"</h1>
                <button
                    on:click=move |_| view_mode.set(BoardView::Write)
                    class="px-4 py-2 bg-blue-600 hover:bg-blue-700 rounded-lg font-medium"
                >
                    "Write"
                </button>
            </div>

            <input
                type="text"
                placeholder="Search title, author or content"
                prop:value=term
                on:input=move |ev| set_term.set(event_target_value(&ev))
                class="w-full bg-gray-700 rounded-lg px-4 py-2 border border-gray-600 focus:border-blue-500 focus:outline-none"
            />

            <table class="w-full text-left text-sm">
                <thead class="text-gray-400 border-b border-gray-700">
                    <tr>
                        <th class="py-2 w-12">"No."</th>
                        <th class="py-2">"Title"</th>
                        <th class="py-2 w-32">"Author"</th>
                        <th class="py-2 w-28">"Date"</th>
                        <th class="py-2 w-16 text-right">"Views"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let posts = visible();
                        if posts.is_empty() {
                            return view! {
                                <tr><td colspan="5" class="py-8 text-center text-gray-400">"No posts found."</td></tr>
                            }.into_view();
                        }
                        posts.into_iter().map(|post| {
                            let id = post.id;
                            view! {
                                <tr
                                    on:click=move |_| open(id)
                                    class="border-b border-gray-700 hover:bg-gray-700 cursor-pointer"
                                >
                                    <td class="py-2 text-gray-400">{id}</td>
                                    <td class="py-2">
                                        {post.title.clone()}
                                        {(post.comment_count() > 0).then(|| view! {
                                            <span class="ml-2 text-blue-400">{format!("[{}]", post.comment_count())}</span>
                                        })}
                                    </td>
                                    <td class="py-2">{post.author.clone()}</td>
                                    <td class="py-2 text-gray-400">{format::post_date(post.created_at)}</td>
                                    <td class="py-2 text-right text-gray-400">{post.views}</td>
                                </tr>
                            }
                        }).collect_view()
                    }}
                </tbody>
            </table>
        </section>
    }
}

#[component]
fn PostView(id: PostId, board: RwSignal<Board>, view_mode: RwSignal<BoardView>) -> impl IntoView {
    let state = use_global_state();
    let post = move || board.with(|b| b.get(id).cloned());

    let (comment, set_comment) = create_signal(String::new());
    let add_comment = move |_| {
        let text = comment.get_untracked();
        let added = board.try_update(|b| b.add_comment(id, &text, chrono::Utc::now()));
        match added {
            Some(Ok(_)) => set_comment.set(String::new()),
            Some(Err(e)) => state.show_board_error(&e),
            None => {}
        }
    };

    view! {
        {move || match post() {
            None => view! {
                <section class="bg-gray-800 rounded-xl p-12 text-center">
                    <p class="text-gray-400 mb-4">"This post no longer exists."</p>
                    <BackButton view_mode=view_mode />
                </section>
            }.into_view(),
            Some(post) => view! {
                <section class="bg-gray-800 rounded-xl p-6 space-y-6">
                    <BackButton view_mode=view_mode />

                    <header class="border-b border-gray-700 pb-4">
                        <h1 class="text-2xl font-bold mb-2">{post.title.clone()}</h1>
                        <div class="text-sm text-gray-400 flex gap-4">
                            <span>{post.author.clone()}</span>
                            <span>{format::post_timestamp(post.created_at)}</span>
                            <span>{format!("Views {}", post.views)}</span>
                        </div>
                    </header>

                    <p class="whitespace-pre-wrap">{post.content.clone()}</p>

                    <ManagePost post=post.clone() board=board view_mode=view_mode state=state />

                    <div class="border-t border-gray-700 pt-4 space-y-3">
                        <h2 class="font-semibold">{format!("Comments ({})", post.comment_count())}</h2>
                        {post.comments.iter().map(|c| view! {
                            <div class="bg-gray-700 rounded-lg p-3">
                                <div class="text-xs text-gray-400 mb-1">
                                    {c.author.clone()} " · " {format::post_timestamp(c.created_at)}
                                </div>
                                <p>{c.content.clone()}</p>
                            </div>
                        }).collect_view()}
                    </div>
                </section>
            }.into_view(),
        }}

        <section class="bg-gray-800 rounded-xl p-6 mt-4 flex gap-3">
            <input
                type="text"
                placeholder="Write a comment"
                prop:value=comment
                on:input=move |ev| set_comment.set(event_target_value(&ev))
                class="flex-1 bg-gray-700 rounded-lg px-4 py-2 border border-gray-600 focus:border-blue-500 focus:outline-none"
            />
            <button
                on:click=add_comment
                class="px-4 py-2 bg-blue-600 hover:bg-blue-700 rounded-lg font-medium"
            >
                "Comment"
            </button>
        </section>
    }
}

/// Password-gated edit and delete controls
#[component]
fn ManagePost(
    post: Post,
    board: RwSignal<Board>,
    view_mode: RwSignal<BoardView>,
    state: GlobalState,
) -> impl IntoView {
    let id = post.id;
    let (open, set_open) = create_signal(false);
    let (password, set_password) = create_signal(String::new());
    let (title, set_title) = create_signal(post.title.clone());
    let (content, set_content) = create_signal(post.content.clone());

    let save = move |_| {
        let edit = PostEdit {
            title: Some(title.get_untracked()),
            content: Some(content.get_untracked()),
        };
        let pw = password.get_untracked();
        match board.try_update(|b| b.update(id, &pw, edit).map(|_| ())) {
            Some(Ok(())) => {
                set_open.set(false);
                state.show_success("Post updated");
            }
            Some(Err(e)) => state.show_board_error(&e),
            None => {}
        }
    };

    let delete = move |_| {
        let pw = password.get_untracked();
        match board.try_update(|b| b.delete(id, &pw).map(|_| ())) {
            Some(Ok(())) => {
                state.show_success("Post deleted");
                view_mode.set(BoardView::List);
            }
            Some(Err(e)) => state.show_board_error(&e),
            None => {}
        }
    };

    view! {
        <div>
            <button
                on:click=move |_| set_open.update(|o| *o = !*o)
                class="text-sm text-gray-400 hover:text-white"
            >
                {move || if open.get() { "Cancel" } else { "Edit / Delete" }}
            </button>

            {move || open.get().then(|| view! {
                <div class="mt-3 space-y-3 bg-gray-700 rounded-lg p-4">
                    <input
                        type="text"
                        prop:value=title
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                        class="w-full bg-gray-800 rounded-lg px-3 py-2 border border-gray-600"
                    />
                    <textarea
                        prop:value=content
                        on:input=move |ev| set_content.set(event_target_value(&ev))
                        rows="5"
                        class="w-full bg-gray-800 rounded-lg px-3 py-2 border border-gray-600"
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        prop:value=password
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        class="w-full bg-gray-800 rounded-lg px-3 py-2 border border-gray-600"
                    />
                    <div class="flex gap-3">
                        <button on:click=save class="px-4 py-2 bg-blue-600 hover:bg-blue-700 rounded-lg">"Save"</button>
                        <button on:click=delete class="px-4 py-2 bg-red-600 hover:bg-red-700 rounded-lg">"Delete"</button>
                    </div>
                </div>
            })}
        </div>
    }
}

#[component]
fn WriteForm(board: RwSignal<Board>, view_mode: RwSignal<BoardView>) -> impl IntoView {
    let state = use_global_state();
    let draft = create_rw_signal(PostDraft::default());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let submitted = draft.get_untracked();
        match board.try_update(|b| b.submit(submitted, chrono::Utc::now())) {
            Some(Ok(_)) => {
                draft.update(PostDraft::clear);
                state.show_success("Post published");
                view_mode.set(BoardView::List);
            }
            Some(Err(e)) => state.show_board_error(&e),
            None => {}
        }
    };

    let input_class = "w-full bg-gray-700 rounded-lg px-4 py-2 border border-gray-600 focus:border-blue-500 focus:outline-none";

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-4">
            <BackButton view_mode=view_mode />
            <h1 class="text-2xl font-bold">"New post"</h1>

            <form on:submit=on_submit class="space-y-4">
                <input
                    type="text"
                    placeholder="Title"
                    prop:value=move || draft.with(|d| d.title.clone())
                    on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                    class=input_class
                />
                <div class="flex gap-3">
                    <input
                        type="text"
                        placeholder="Author"
                        prop:value=move || draft.with(|d| d.author.clone())
                        on:input=move |ev| draft.update(|d| d.author = event_target_value(&ev))
                        class=input_class
                    />
                    <input
                        type="password"
                        placeholder="Password, needed for edit/delete"
                        prop:value=move || draft.with(|d| d.password.clone())
                        on:input=move |ev| draft.update(|d| d.password = event_target_value(&ev))
                        class=input_class
                    />
                </div>
                <textarea
                    placeholder="Content"
                    rows="10"
                    prop:value=move || draft.with(|d| d.content.clone())
                    on:input=move |ev| draft.update(|d| d.content = event_target_value(&ev))
                    class=input_class
                />
                <button type="submit" class="px-6 py-2 bg-blue-600 hover:bg-blue-700 rounded-lg font-medium">
                    "Publish"
                </button>
            </form>
        </section>
    }
}

#[component]
fn BackButton(view_mode: RwSignal<BoardView>) -> impl IntoView {
    view! {
        <button
            on:click=move |_| view_mode.set(BoardView::List)
            class="px-4 py-2 bg-gray-700 rounded-lg text-gray-300 hover:text-white"
        >
            "← Back to list"
        </button>
    }
}
