//! Built-in demo book, used when no book file is given on the command line.

use super::model::{Book, Chapter, ChatbotConfig, FormField, Page};

/// A small two-chapter book exercising every page kind.
pub fn demo_book() -> Book {
    Book::new("field-notes", "Field Notes from a Lighthouse Keeper")
        .with_author("E. M. Harlow")
        .with_year(1911)
        .with_cover(Page::Cover {
            title: "Field Notes from a Lighthouse Keeper".to_string(),
            is_book_cover: true,
        })
        .with_index(Page::Index {
            title: "Contents".to_string(),
        })
        .add_chapter(winter_light())
        .add_chapter(spring_crossings())
}

fn winter_light() -> Chapter {
    Chapter::new("The Winter Light")
        .add_page(Page::text(WINTER_ONE))
        .add_page(Page::text(WINTER_TWO))
        .add_page(Page::Chatbot {
            config: ChatbotConfig {
                title: Some("Talk it over".to_string()),
                instruction: Some(
                    "Discuss the keeper's winter routine. Ask what the reader would find \
                     hardest about the work, and invite comparisons with their own habits."
                        .to_string(),
                ),
                ..ChatbotConfig::default()
            },
        })
        .add_page(Page::Form {
            title: "Reader survey".to_string(),
            fields: vec![
                FormField::Text {
                    id: "image".to_string(),
                    label: "Which image from this chapter stayed with you?".to_string(),
                    placeholder: Some("A sentence or two".to_string()),
                    multiline: true,
                },
                FormField::Select {
                    id: "watch".to_string(),
                    label: "If you kept the light, which watch would you take?".to_string(),
                    options: vec![
                        "Dusk to midnight".to_string(),
                        "Midnight to four".to_string(),
                        "Four until dawn".to_string(),
                    ],
                },
                FormField::Checkboxes {
                    id: "duties".to_string(),
                    label: "Which of the keeper's duties sound hardest?".to_string(),
                    options: vec![
                        "Trimming the wicks".to_string(),
                        "Hauling oil up the stairs".to_string(),
                        "Polishing the lens".to_string(),
                        "Keeping the log in a gale".to_string(),
                    ],
                },
                FormField::Number {
                    id: "rating".to_string(),
                    label: "Rate this chapter from 1 to 5".to_string(),
                    placeholder: None,
                    min: Some(1.0),
                    max: Some(5.0),
                },
            ],
        })
        .add_page(Page::Audio {
            url: "https://archive.example.org/harlow/winter-interview.mp3".to_string(),
            content: AUDIO_TRANSCRIPT.to_string(),
        })
}

fn spring_crossings() -> Chapter {
    Chapter::new("Spring Crossings")
        .add_page(Page::Cover {
            title: "Spring Crossings".to_string(),
            is_book_cover: false,
        })
        .add_page(Page::text(SPRING_ONE))
        .add_page(Page::Chatbot {
            config: ChatbotConfig::default(),
        })
        .add_page(Page::Form {
            title: "Closing thoughts".to_string(),
            fields: vec![
                FormField::Text {
                    id: "question".to_string(),
                    label: "What would you ask the keeper if you could?".to_string(),
                    placeholder: None,
                    multiline: true,
                },
                FormField::Select {
                    id: "return".to_string(),
                    label: "Would you read a second volume?".to_string(),
                    options: vec![
                        "Gladly".to_string(),
                        "Perhaps".to_string(),
                        "The sea is not for me".to_string(),
                    ],
                },
            ],
        })
}

const WINTER_ONE: &str = "<h2>First Weeks on the Rock</h2>\
<p>The tender left me on the landing stage with two trunks, a sack of flour, and \
a letter of instruction from the Board that I had already read eleven times. The \
tower stood above me, whitewashed and indifferent, and the sea worked at the rock \
below it the way a patient man works at a knot. I remember thinking that the \
light itself, glimpsed through the lantern glass, looked small for the reputation \
it carried.</p>\
<p>Mr. Aldous, the principal keeper, met me at the iron door and asked whether I \
had eaten. When I said I had, he nodded as if I had passed a first examination \
and led me up the hundred and six steps without another word. Every lighthouse, I \
would learn, has its own arithmetic, and a keeper counts it without meaning to. \
Steps, gallons, wicks, hours. The counting becomes a kind of prayer.</p>\
<p>My duties that first winter were plain. I trimmed the wicks at dusk and again \
before the middle watch. I hauled oil from the store, a gallon at a time, and \
learned to carry it against my chest on the turning stair so the can would not \
ring against the wall. I polished the great lens each forenoon until Mr. Aldous \
could find no bloom on the brass, and then, because he could always find some, I \
polished it again.</p>\
<p>The log was the heart of the station. Weather at every watch, the state of \
the sea, vessels sighted and their headings, oil consumed to the quarter pint. \
Mr. Aldous wrote a small, upright hand and expected the same of me. A light that \
is not logged, he said, might as well not have burned.</p>\
<p>At night the tower spoke. The stair ticked as the stone cooled, the weights \
of the clockwork sighed in their shaft, and the wind found the gallery rail and \
played it like a reed. I slept in a curved room on a curved bed and dreamed, \
those first weeks, of nothing at all.</p>";

const WINTER_TWO: &str = "<h2>The Gale of St. Lucy's Day</h2>\
<p>The glass began to fall on the twelfth of December and kept falling, as \
though the weather had somewhere deep to get to. Mr. Aldous read the barometer \
twice in an hour, which in him amounted to open alarm, and we made the gallery \
fast and double-lashed the boat at the landing.</p>\
<p>By dark the sea had gone the colour of slate and stood up around the rock in \
shapes I had no names for. Spray reached the lantern itself, one hundred and \
thirty feet above the mean tide, and froze there, so that between watches we \
went out on the gallery with wooden scrapers to keep the glass clear. The wind \
took the breath out of my mouth as if it had a right to it.</p>\
<p>All that night the light turned at its appointed rate, four seconds bright, \
eleven dark, while the tower moved under us like a living thing. I confess I put \
my hand flat on the stair wall and felt it tremble, and Mr. Aldous saw me do it. \
A good tower bends, he said. It is the stiff ones that crack.</p>\
<p>Toward morning a schooner showed her lights to the south, laboring, and we \
watched her the better part of an hour until she cleared the head. Mr. Aldous \
entered her in the log in his small hand and said nothing, but he stood at the \
glass a long time after she was gone.</p>\
<p>I understood then what the work was. Not the wicks, not the brass, not the \
stairs. The work was to be a fixed point in weather that unfixes everything \
else, and to keep a record that the night had been watched.</p>";

const SPRING_ONE: &str = "<h2>The Relief Boat</h2>\
<p>Spring came to the rock the way news comes to a small town, late and all at \
once. One morning the landing was white with gulls, and the sea, which had spent \
four months trying the door, lay down like a dog before the fire.</p>\
<p>The relief boat brought letters, onions, a new man for the second watch, and \
word that I was to be examined for my certificate in June. Mr. Aldous heard this \
with the expression of a man who has ordered weather and received it, and set me \
to the signal flags that same afternoon.</p>\
<p>I record here, for those who may follow me into the service, the things the \
manuals do not say. Bake on the calm days, for the stove will not draw in a \
gale. Write your letters before you are tired. Learn the birds, because they \
will be your almanac; the first puffin is worth a week of the barometer. And \
never pass the lens without looking at it, for the day you stop seeing it is \
the day you have begun to leave the service, whatever your feet are doing.</p>\
<p>In May I rowed the new man around the rock at slack water so he might see \
the tower whole, as the mariners see it. He was quiet a while and then asked me \
how I bore the sameness of the days. I told him what I have tried to set down \
in these notes, that there is no sameness in them at all, only a pattern, and \
that a pattern looked at long enough opens like a door.</p>";

const AUDIO_TRANSCRIPT: &str = "<h2>A Conversation with the Keeper's Granddaughter</h2>\
<p><em>Recorded at Penhallow, 1974. The speaker is Margaret Harlow Voss.</em></p>\
<p>He never called it lonely. That was the thing that surprised people. He said \
the tower was the most crowded place he ever worked, what with the weather \
coming to call at all hours and the ships going by with their whole lives aboard.</p>\
<p>He kept the notebooks his whole time on the rock, nine years, and when he came \
ashore for good my grandmother had them bound. He would read them to my father as \
bedtime stories, the gales especially. The worse the weather in the notebook, the \
better my father slept, she said.</p>\
<p>What you hear in the recordings, and what I hope survives in the book, is a \
man who believed attention was a form of kindness. You watched the sea because \
someone was on it. It was as simple as that for him, and as large.</p>";
