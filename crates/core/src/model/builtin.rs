//! Reference catalog shipped with the application.

use crate::model::catalog::{Catalog, Discipline, StudyUnit, SubjectArea};
use crate::model::ids::{DisciplineId, SubjectAreaId, UnitId};

fn unit(id: &str, name: &str, description: &str, lessons: u32) -> StudyUnit {
    // Five questions per lesson across the reference catalog.
    StudyUnit::new(UnitId::new(id), name, description, lessons, lessons * 5)
}

fn discipline(id: &str, name: &str, description: &str, units: Vec<StudyUnit>) -> Discipline {
    Discipline::new(DisciplineId::new(id), name, description, units)
}

fn area(
    id: &str,
    name: &str,
    description: &str,
    icon: &str,
    disciplines: Vec<Discipline>,
) -> SubjectArea {
    SubjectArea::new(SubjectAreaId::new(id), name, description, icon, disciplines)
}

fn subject_areas() -> Vec<SubjectArea> {
    vec![
        area(
            "aqidah",
            "Creed",
            "Foundations of faith, divine oneness and the pillars of Islam",
            "🕌",
            vec![
                discipline(
                    "tawheed",
                    "Tawheed",
                    "Oneness of God in lordship, worship, names and attributes",
                    vec![
                        unit("tawheed-1", "Kitab al-Tawhid", "Muhammad ibn Abd al-Wahhab", 24),
                        unit("tawheed-2", "Al-Aqidah al-Wasitiyyah", "Ibn Taymiyyah", 18),
                        unit("tawheed-3", "Lum'at al-I'tiqad", "Ibn Qudamah al-Maqdisi", 12),
                    ],
                ),
                discipline(
                    "asma-sifat",
                    "Names and Attributes",
                    "The beautiful names of God and His attributes",
                    vec![
                        unit("asma-1", "Sharh Asma Allah al-Husna", "Al-Sa'di", 20),
                        unit("asma-2", "Al-Qawa'id al-Muthla", "Ibn Uthaymin", 15),
                    ],
                ),
                discipline(
                    "usul-din",
                    "Principles of the Religion",
                    "Principles of creed and the pillars of faith",
                    vec![
                        unit("usul-1", "Al-Usul al-Thalathah", "Muhammad ibn Abd al-Wahhab", 8),
                        unit("usul-2", "Al-Qawa'id al-Arba'", "Muhammad ibn Abd al-Wahhab", 6),
                    ],
                ),
            ],
        ),
        area(
            "fiqh",
            "Jurisprudence",
            "Rulings of worship and transactions",
            "📜",
            vec![
                discipline(
                    "ibadat",
                    "Acts of Worship",
                    "Purification, prayer, alms, fasting and pilgrimage",
                    vec![
                        unit("ibadat-1", "Umdat al-Fiqh", "Ibn Qudamah", 30),
                        unit("ibadat-2", "Zad al-Mustaqni'", "Al-Hajjawi", 40),
                    ],
                ),
                discipline(
                    "muamalat",
                    "Transactions",
                    "Sales, contracts and financial dealings",
                    vec![unit("muamalat-1", "Kitab al-Buyu'", "From Zad al-Mustaqni'", 25)],
                ),
                discipline(
                    "usul-fiqh",
                    "Principles of Jurisprudence",
                    "Rules from which legal rulings are derived",
                    vec![
                        unit("usul-fiqh-1", "Al-Waraqat", "Al-Juwayni", 12),
                        unit("usul-fiqh-2", "Al-Usul min Ilm al-Usul", "Ibn Uthaymin", 20),
                    ],
                ),
            ],
        ),
        area(
            "hadith",
            "Hadith",
            "Prophetic traditions and their sciences",
            "📖",
            vec![
                discipline(
                    "mustalah",
                    "Hadith Terminology",
                    "Principles of narration and grading",
                    vec![
                        unit("mustalah-1", "Al-Bayquniyyah", "Al-Bayquni", 8),
                        unit("mustalah-2", "Nukhbat al-Fikr", "Ibn Hajar", 15),
                    ],
                ),
                discipline(
                    "mutun-hadith",
                    "Hadith Texts",
                    "Memorisation and study of prophetic narrations",
                    vec![
                        unit("mutun-1", "Al-Arba'in al-Nawawiyyah", "Al-Nawawi", 42),
                        unit("mutun-2", "Umdat al-Ahkam", "Abd al-Ghani al-Maqdisi", 35),
                        unit("mutun-3", "Bulugh al-Maram", "Ibn Hajar", 50),
                    ],
                ),
            ],
        ),
        area(
            "seerah",
            "Seerah",
            "Life of the Prophet and early Islamic history",
            "🌙",
            vec![discipline(
                "seerah-nabawiyyah",
                "Prophetic Biography",
                "From birth to passing",
                vec![
                    unit("seerah-1", "Al-Rahiq al-Makhtum", "Al-Mubarakpuri", 40),
                    unit("seerah-2", "Zad al-Ma'ad", "Ibn al-Qayyim", 60),
                ],
            )],
        ),
        area(
            "quran",
            "Quranic Sciences",
            "Exegesis, recitation and the sciences of the Quran",
            "📗",
            vec![
                discipline(
                    "tafseer",
                    "Exegesis",
                    "Understanding the meanings of the Quran",
                    vec![unit("tafseer-1", "Tafsir al-Sa'di", "Taysir al-Karim al-Rahman", 100)],
                ),
                discipline(
                    "tajweed",
                    "Recitation",
                    "Rules of Quranic recitation",
                    vec![
                        unit("tajweed-1", "Tuhfat al-Atfal", "Al-Jamzuri", 10),
                        unit("tajweed-2", "Al-Jazariyyah", "Ibn al-Jazari", 15),
                    ],
                ),
            ],
        ),
        area(
            "arabic",
            "Arabic Language",
            "Grammar, morphology and rhetoric",
            "✍️",
            vec![
                discipline(
                    "nahw",
                    "Grammar",
                    "Rules of Arabic syntax and parsing",
                    vec![
                        unit("nahw-1", "Al-Ajurrumiyyah", "Ibn Ajurrum", 15),
                        unit("nahw-2", "Qatr al-Nada", "Ibn Hisham", 25),
                        unit("nahw-3", "Alfiyyat Ibn Malik", "Ibn Malik", 50),
                    ],
                ),
                discipline(
                    "sarf",
                    "Morphology",
                    "Word patterns and conjugation",
                    vec![unit("sarf-1", "Al-Bina' wa al-Asas", "Introduction to morphology", 12)],
                ),
            ],
        ),
    ]
}

impl Catalog {
    /// The built-in six-area reference catalog.
    #[must_use]
    pub fn builtin() -> Self {
        // Ids are literals above; the uniqueness check cannot fail.
        Self::new(subject_areas()).unwrap_or_else(|err| unreachable!("builtin catalog: {err}"))
    }
}
