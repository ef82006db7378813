use std::path::PathBuf;

use fiche::{Card, CardConfig, CardFields, FontSystem, Style, card::file_name};

#[allow(clippy::unwrap_used)]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1. Fonts: system sans-serif, falling back to hollow boxes if none is installed
    let fonts = FontSystem::with_system_fonts();
    println!("Loaded {} font faces", fonts.len());

    // 2. Optional photo given as the first argument
    let photo = std::env::args().nth(1).map(|path| std::fs::read(path).unwrap());

    // 3. Card content
    let fields = CardFields {
        number: "1".into(),
        name: "Rougegorge familier".into(),
        scientific_name: "Erithacus rubecula".into(),
        dimensions: "14 cm / 18 grammes".into(),
        habitat: "Jardins, haies, lisieres et sous-bois".into(),
        diet: "Insectes, araignees, vers de terre, baies et graines en hiver".into(),
        behavior: "Solitaire et territorial, il defend son coin de jardin toute l'annee".into(),
        distinguishing_trait: "Plastron orange vif encadre de gris".into(),
        confusions: "Rougequeue noir, bouvreuil pivoine".into(),
        description: "Le rougegorge chante presque toute l'annee, meme en plein hiver. \
                      Peu farouche, il suit volontiers le jardinier pour attraper les vers \
                      que la beche fait remonter. Males et femelles se ressemblent."
            .into(),
        photo,
    };

    // 4. Render every style
    let out_dir = PathBuf::from("debug");
    std::fs::create_dir_all(&out_dir).unwrap();

    for style in Style::ALL {
        let config = CardConfig {
            style,
            ..CardConfig::default()
        };
        let card = Card::render(&fields, &config, &fonts).unwrap();
        let layout = card.layout();
        println!(
            "{style:>10}: bubbles {}px wide, free text at y={}, photo pasted: {}",
            layout.bubble_width,
            layout.free_text.origin().y,
            layout.photo_pasted
        );

        let path = out_dir.join(format!("{style}_{}", file_name(&fields.name)));
        std::fs::write(&path, card.encode_jpeg(90).unwrap()).unwrap();
        println!("Saved {}", path.display());
    }
}
