/// Text and photo supplied for one card.
///
/// Every field may be empty: empty sections still get a bubble holding only
/// their label.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardFields {
    /// Card number shown in the badge.
    pub number: String,
    /// Subject name, drawn upper-cased as the title.
    pub name: String,
    pub scientific_name: String,
    pub dimensions: String,
    pub habitat: String,
    pub diet: String,
    pub behavior: String,
    pub distinguishing_trait: String,
    pub confusions: String,
    /// Longer free text placed in the wide bubble below the sections.
    pub description: String,
    /// Encoded photo (JPEG, PNG). Decoded at render time.
    pub photo: Option<Vec<u8>>,
}

/// The labelled sections of a card, in drawing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    ScientificName,
    Dimensions,
    Habitat,
    Diet,
    Behavior,
    DistinguishingTrait,
    Confusions,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::ScientificName,
        Section::Dimensions,
        Section::Habitat,
        Section::Diet,
        Section::Behavior,
        Section::DistinguishingTrait,
        Section::Confusions,
    ];

    /// French label drawn at the top of the bubble.
    pub fn label(&self) -> &'static str {
        match self {
            Section::ScientificName => "Nom scientifique",
            Section::Dimensions => "Dimensions",
            Section::Habitat => "Habitat",
            Section::Diet => "Alimentation",
            Section::Behavior => "Comportement",
            Section::DistinguishingTrait => "Trait particulier",
            Section::Confusions => "Confusions",
        }
    }
}

impl CardFields {
    /// Content of one section.
    pub fn section(&self, section: Section) -> &str {
        match section {
            Section::ScientificName => &self.scientific_name,
            Section::Dimensions => &self.dimensions,
            Section::Habitat => &self.habitat,
            Section::Diet => &self.diet,
            Section::Behavior => &self.behavior,
            Section::DistinguishingTrait => &self.distinguishing_trait,
            Section::Confusions => &self.confusions,
        }
    }

    /// Label/content pairs in drawing order.
    pub fn sections(&self) -> impl Iterator<Item = (Section, &str)> + '_ {
        Section::ALL
            .into_iter()
            .map(move |section| (section, self.section(section)))
    }
}
