use crate::candy::CandyStyle;
use crate::sound::{Cue, SoundBoard};
use candy_memory_core as game;
use gloo::timers::callback::{Interval, Timeout};
use yew::prelude::*;

fn format_clock(seconds: game::Seconds) -> String {
    format!("⏱️ {}:{:02}", seconds / 60, seconds % 60)
}

fn format_pairs(pairs: u8) -> String {
    format!("🍬 Pairs: {}/{}", pairs, game::PAIR_COUNT)
}

fn result_text(outcome: game::RoundOutcome) -> &'static str {
    use game::RoundOutcome::*;
    match outcome {
        InProgress => "",
        Won => "YOU WON! 🎉",
        Lost => "YOU LOST! 😢",
    }
}

/// Which sound, if any, accompanies an event. Mismatches and ticks are silent,
/// and the match chime stands in for the flip of a pair's second card.
fn cue_for(event: game::GameEvent) -> Option<Cue> {
    use game::GameEvent::*;
    match event {
        CardFlipped {
            face: game::CardFace::FaceUp(_),
            ..
        } => Some(Cue::Flip),
        CardFlipped { .. } => None,
        Match => Some(Cue::Match),
        Won => Some(Cue::Win),
        Lost => Some(Cue::Lose),
        Tick(_) | Mismatch | FlipBackScheduled(_) => None,
    }
}

/// Events after which the round clock has nothing left to count.
fn stops_clock(event: game::GameEvent) -> bool {
    matches!(event, game::GameEvent::Won | game::GameEvent::Lost)
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    SelectCard(game::CardId),
    Tick,
    FlipBack(game::FlipBack),
    NewGame,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    id: game::CardId,
    face: game::CardFace,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CardId>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    use game::CardFace::*;

    let CardProps {
        id,
        face,
        locked,
        callback,
    } = props.clone();

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", id);
        callback.emit(id);
    });

    match face {
        FaceDown(number) => html! {
            <td>
                <button class={classes!("card", "back", locked.then_some("locked"))} {onclick}>
                    {number.to_string()}
                </button>
            </td>
        },
        FaceUp(candy) | Matched(candy) => {
            let style = CandyStyle::of(candy);
            let matched = matches!(face, Matched(_));
            html! {
                <td>
                    <button
                        class={classes!("card", "front", matched.then_some("matched"))}
                        style={format!("--candy: {}", style.css_color())}
                        title={style.name}
                        disabled={matched}
                        {onclick}
                    >
                        {style.glyph}
                    </button>
                </td>
            }
        }
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub seed: u64,
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: game::GameSession<Vec<game::GameEvent>>,
    sound: SoundBoard,
    _tick_interval: Option<Interval>,
    flip_back_timeout: Option<Timeout>,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(1_000, move || link.send_message(Msg::Tick))
    }

    /// Drains the events recorded by the session: plays their cues, arms the
    /// flip-back timeout and drops the clock once the round is decided.
    fn dispatch_events(&mut self, ctx: &Context<Self>) {
        for event in std::mem::take(self.session.observer_mut()) {
            log::trace!("event: {:?}", event);

            if stops_clock(event) {
                self._tick_interval = None;
            }

            if let game::GameEvent::FlipBackScheduled(ticket) = event {
                let link = ctx.link().clone();
                self.flip_back_timeout = Some(Timeout::new(game::FLIP_BACK_DELAY_MS, move || {
                    link.send_message(Msg::FlipBack(ticket))
                }));
            }

            if let Some(cue) = cue_for(event) {
                self.sound.play(cue);
            }
        }
    }

    fn is_locked(&self, card: &game::Card) -> bool {
        self.session.is_finished()
            || self.session.round().selection().is_blocked()
            || !card.is_selectable()
    }

    fn get_outcome_class(&self) -> Classes {
        use game::RoundOutcome::*;
        classes!(match self.session.outcome() {
            InProgress => "in-progress",
            Won => "win",
            Lost => "lose",
        })
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            session: game::GameSession::new(ctx.props().seed, Vec::new()),
            sound: SoundBoard::default(),
            _tick_interval: Some(GameView::create_timer(ctx)),
            flip_back_timeout: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            SelectCard(id) => match self.session.select_card(id) {
                Ok(outcome) => {
                    log::debug!("select card {}: {:?}", id, outcome);
                    outcome.has_update()
                }
                Err(err) => {
                    log::error!("select card {}: {}", id, err);
                    false
                }
            },
            Tick => self.session.tick().has_update(),
            FlipBack(ticket) => {
                self.flip_back_timeout = None;
                self.session.flip_back(ticket).has_update()
            }
            NewGame => {
                // dropping the old interval and timeout cancels them
                self.flip_back_timeout = None;
                self._tick_interval = Some(GameView::create_timer(ctx));
                self.session.start_new_round();
                true
            }
        };

        self.dispatch_events(ctx);
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let clock_class = classes!("clock", self.session.is_running_low().then_some("low"));
        let clock = format_clock(self.session.time_remaining());
        let pairs = format_pairs(self.session.pairs_found());
        let result = result_text(self.session.outcome());
        let outcome_class = self.get_outcome_class();
        let playable = !self.session.is_finished();

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });

        html! {
            <div class="candy-memory">
                <header>
                    <h1>{"CANDY MEMORY GAME"}</h1>
                    <nav>
                        <aside class={clock_class}>{clock}</aside>
                        <aside class="pairs">{pairs}</aside>
                        <aside class={classes!("result", outcome_class)}>{result}</aside>
                    </nav>
                    <button class="new-game" onclick={cb_new_game}>{"NEW GAME"}</button>
                </header>
                <table class={playable.then_some("playable")}>
                    {
                        for (0..game::GRID_SIZE).map(|y| html! {
                            <tr>
                                {
                                    for (0..game::GRID_SIZE).filter_map(|x| game::card_id_at((x, y))).map(|id| {
                                        let card = &self.session.deck()[id];
                                        let face = card.face();
                                        let locked = self.is_locked(card);
                                        let callback = ctx.link().callback(Msg::SelectCard);
                                        html! {
                                            <CardView {id} {face} {locked} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
            </div>
        }
    }
}
