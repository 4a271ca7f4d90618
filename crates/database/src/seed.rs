//! Demo catalog written on first initialization

use chrono::Duration as ChronoDuration;
use yamiko_core::{Chapter, Timestamp, Title, TitleId, TitleStatus, TitleType};

/// Most chapters seeded per title
pub const MAX_DEMO_CHAPTERS: u32 = 5;

const TRANSLATOR: &str = "Yamiko Scans";

const DEMO_PAGES: [&str; 3] = [
    "https://images.unsplash.com/photo-1612036782180-6f0b6cd846fe?w=800",
    "https://images.unsplash.com/photo-1578632767115-351597cf2477?w=800",
    "https://images.unsplash.com/photo-1635805737707-575885ab0820?w=800",
];

struct DemoTitle {
    slug: &'static str,
    name: &'static str,
    alt_titles: &'static [&'static str],
    description: &'static str,
    cover: &'static str,
    kind: TitleType,
    status: TitleStatus,
    year: i32,
    author: &'static str,
    artist: &'static str,
    genres: &'static [&'static str],
    views: u64,
    rating: f32,
    rating_count: u32,
    chapters_count: u32,
}

const DEMO_TITLES: [DemoTitle; 8] = [
    DemoTitle {
        slug: "demon-slayer",
        name: "Клинок, рассекающий демонов",
        alt_titles: &["Demon Slayer", "Kimetsu no Yaiba"],
        description: "История о молодом Танджиро, который становится охотником на демонов после того, как его семья была убита, а младшая сестра превращена в демона.",
        cover: "https://images.unsplash.com/photo-1578632767115-351597cf2477?w=400&h=600&fit=crop",
        kind: TitleType::Manga,
        status: TitleStatus::Completed,
        year: 2016,
        author: "Коёхару Готоге",
        artist: "Коёхару Готоге",
        genres: &["Экшен", "Фэнтези", "Приключения", "Сёнен"],
        views: 15420,
        rating: 9.2,
        rating_count: 1243,
        chapters_count: 205,
    },
    DemoTitle {
        slug: "solo-leveling",
        name: "Поднятие уровня в одиночку",
        alt_titles: &["Solo Leveling", "나 혼자만 레벨업"],
        description: "Сун Джин Ву — самый слабый охотник класса Е, который едва сводит концы с концами. Однажды он оказывается в тайном подземелье и получает способность «повышения уровня».",
        cover: "https://images.unsplash.com/photo-1612036782180-6f0b6cd846fe?w=400&h=600&fit=crop",
        kind: TitleType::Manhwa,
        status: TitleStatus::Completed,
        year: 2018,
        author: "Chugong",
        artist: "Jang Sung-rak",
        genres: &["Экшен", "Фэнтези", "Приключения"],
        views: 28350,
        rating: 9.5,
        rating_count: 2156,
        chapters_count: 179,
    },
    DemoTitle {
        slug: "one-piece",
        name: "Ван Пис",
        alt_titles: &["One Piece", "ワンピース"],
        description: "Монки Д. Луффи мечтает найти легендарное сокровище One Piece и стать Королём Пиратов. Вместе со своей командой он отправляется в опасное путешествие по Гранд Лайн.",
        cover: "https://images.unsplash.com/photo-1618336753974-aae8e04506aa?w=400&h=600&fit=crop",
        kind: TitleType::Manga,
        status: TitleStatus::Ongoing,
        year: 1997,
        author: "Эйитиро Ода",
        artist: "Эйитиро Ода",
        genres: &["Экшен", "Комедия", "Приключения", "Фэнтези", "Сёнен"],
        views: 45200,
        rating: 9.8,
        rating_count: 5420,
        chapters_count: 1105,
    },
    DemoTitle {
        slug: "jujutsu-kaisen",
        name: "Магическая битва",
        alt_titles: &["Jujutsu Kaisen", "呪術廻戦"],
        description: "Итадори Юджи — обычный школьник с невероятной физической силой. После того как он проглатывает палец демона Сукуны, его жизнь кардинально меняется.",
        cover: "https://images.unsplash.com/photo-1635805737707-575885ab0820?w=400&h=600&fit=crop",
        kind: TitleType::Manga,
        status: TitleStatus::Completed,
        year: 2018,
        author: "Гэгэ Акутами",
        artist: "Гэгэ Акутами",
        genres: &["Экшен", "Фэнтези", "Ужасы", "Сёнен"],
        views: 22100,
        rating: 9.1,
        rating_count: 1876,
        chapters_count: 271,
    },
    DemoTitle {
        slug: "attack-on-titan",
        name: "Атака титанов",
        alt_titles: &["Attack on Titan", "Shingeki no Kyojin", "進撃の巨人"],
        description: "Человечество оказалось на грани вымирания после появления гигантских существ — Титанов. Выжившие укрылись за огромными стенами и живут в постоянном страхе.",
        cover: "https://images.unsplash.com/photo-1541562232579-512a21360020?w=400&h=600&fit=crop",
        kind: TitleType::Manga,
        status: TitleStatus::Completed,
        year: 2009,
        author: "Хадзимэ Исаяма",
        artist: "Хадзимэ Исаяма",
        genres: &["Экшен", "Драма", "Фэнтези", "Ужасы", "Психология"],
        views: 38900,
        rating: 9.4,
        rating_count: 3210,
        chapters_count: 139,
    },
    DemoTitle {
        slug: "chainsaw-man",
        name: "Человек-бензопила",
        alt_titles: &["Chainsaw Man", "チェンソーマン"],
        description: "Дэндзи — молодой парень, живущий в нищете и работающий охотником на демонов, чтобы выплатить долги отца якудза. После смерти он сливается с демоном-бензопилой Почитой.",
        cover: "https://images.unsplash.com/photo-1614583225154-5fcdda07019e?w=400&h=600&fit=crop",
        kind: TitleType::Manga,
        status: TitleStatus::Ongoing,
        year: 2018,
        author: "Тацуки Фудзимото",
        artist: "Тацуки Фудзимото",
        genres: &["Экшен", "Ужасы", "Комедия", "Сёнен"],
        views: 19800,
        rating: 9.0,
        rating_count: 1654,
        chapters_count: 156,
    },
    DemoTitle {
        slug: "spy-x-family",
        name: "Семья шпиона",
        alt_titles: &["Spy x Family", "SPY×FAMILY"],
        description: "Шпион под кодовым именем «Сумерки» должен создать фальшивую семью для выполнения миссии. Он не знает, что его приёмная дочь — телепат, а жена — убийца.",
        cover: "https://images.unsplash.com/photo-1596854407944-bf87f6fdd49e?w=400&h=600&fit=crop",
        kind: TitleType::Manga,
        status: TitleStatus::Ongoing,
        year: 2019,
        author: "Тацуя Эндо",
        artist: "Тацуя Эндо",
        genres: &["Комедия", "Экшен", "Романтика", "Сёнен"],
        views: 16700,
        rating: 9.3,
        rating_count: 1423,
        chapters_count: 98,
    },
    DemoTitle {
        slug: "tower-of-god",
        name: "Башня Бога",
        alt_titles: &["Tower of God", "신의 탑"],
        description: "Бам провёл всю жизнь в тёмной пещере, пока не встретил девочку по имени Рахиль. Когда она уходит, чтобы подняться на Башню Бога, Бам следует за ней.",
        cover: "https://images.unsplash.com/photo-1518709268805-4e9042af9f23?w=400&h=600&fit=crop",
        kind: TitleType::Manhwa,
        status: TitleStatus::Ongoing,
        year: 2010,
        author: "SIU",
        artist: "SIU",
        genres: &["Экшен", "Фэнтези", "Приключения", "Драма"],
        views: 21300,
        rating: 9.1,
        rating_count: 1876,
        chapters_count: 580,
    },
];

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Builds the demo titles, all stamped with `now`
pub fn demo_titles(now: Timestamp) -> Vec<Title> {
    DEMO_TITLES
        .iter()
        .map(|demo| Title {
            id: TitleId::new(),
            slug: demo.slug.to_string(),
            name: demo.name.to_string(),
            alt_titles: to_strings(demo.alt_titles),
            description: demo.description.to_string(),
            cover: demo.cover.to_string(),
            kind: demo.kind,
            status: demo.status,
            year: demo.year,
            author: demo.author.to_string(),
            artist: demo.artist.to_string(),
            genres: to_strings(demo.genres),
            views: demo.views,
            rating: demo.rating,
            rating_count: demo.rating_count,
            chapters_count: demo.chapters_count,
            created_at: now,
            updated_at: now,
        })
        .collect()
}

/// Builds up to [`MAX_DEMO_CHAPTERS`] chapters for each title
///
/// View counts and publication dates vary per chapter but are derived from
/// the title's position, so the seed is reproducible.
pub fn demo_chapters(titles: &[Title], now: Timestamp) -> Vec<Chapter> {
    let mut chapters = Vec::new();

    for (index, title) in titles.iter().enumerate() {
        let count = MAX_DEMO_CHAPTERS.min(title.chapters_count);
        for number in 1..=count {
            let spread = (index as u64 * 7 + number as u64 * 13) % 30;
            let published = now.as_datetime() - ChronoDuration::days(spread as i64);

            let mut chapter = Chapter::new(title.id.clone(), number as f64);
            chapter.volume = Some(number.div_ceil(10));
            chapter.title = (number == 1).then(|| "Начало".to_string());
            chapter.pages = to_strings(&DEMO_PAGES);
            chapter.translator = TRANSLATOR.to_string();
            chapter.views = 100 + (index as u64 * 131 + number as u64 * 97) % 1000;
            chapter.created_at = Timestamp::from(published);
            chapters.push(chapter);
        }
    }

    chapters
}
