use chrono::{DateTime, TimeZone, Utc};

use super::motif::{Motif, MotifCategory};

fn seeded_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn motif(
    id: &str,
    title: &str,
    category: MotifCategory,
    description: &str,
    history: &str,
    image_url: &str,
) -> Motif {
    Motif {
        id: id.to_string(),
        title: title.to_string(),
        category,
        description: description.to_string(),
        history: history.to_string(),
        image_url: image_url.to_string(),
        file_name: None,
        created_at: seeded_at(),
    }
}

/// Built-in catalog used to seed an empty store and as the offline fallback.
pub fn default_motifs() -> Vec<Motif> {
    vec![
        motif(
            "1",
            "İznik Lalesi",
            MotifCategory::Cini,
            "Kırmızı ve mavi tonlarıyla İznik çinilerinin en bilinen bezemesi olan lale motifi.",
            "16. yüzyılda Osmanlı saray nakkaşhanesinde olgunlaşan lale, İznik atölyelerinde \
             cami ve saray duvarlarını süsleyen çinilerin vazgeçilmez unsuru oldu.",
            "https://images.motiflab.example/iznik-lalesi.jpg",
        ),
        motif(
            "2",
            "Kütahya Çini Tabağı",
            MotifCategory::Cini,
            "Canlı renkleri ve serbest fırça işçiliğiyle tanınan Kütahya çini tabağı.",
            "Kütahya, İznik'in gerilemesinin ardından 18. yüzyılda Anadolu çiniciliğinin \
             merkezi haline geldi ve geleneği günümüze taşıdı.",
            "https://images.motiflab.example/kutahya-tabagi.jpg",
        ),
        motif(
            "3",
            "Hayat Ağacı",
            MotifCategory::HaliKilim,
            "Sonsuzluğu ve ölümsüzlüğü simgeleyen, halı ve kilimlerde sıkça görülen kompozisyon.",
            "Orta Asya Türk inanışlarında yer ve gök arasındaki bağı temsil eden hayat ağacı, \
             Anadolu dokumalarında yüzyıllardır işlenmektedir.",
            "https://images.motiflab.example/hayat-agaci.jpg",
        ),
        motif(
            "4",
            "Elibelinde",
            MotifCategory::Motif,
            "Elleri belinde kadın figürünü stilize eden, bereket ve anneliği simgeleyen motif.",
            "Neolitik çağ bereket tanrıçası tasvirlerine uzanan elibelinde, Anadolu kilimlerinin \
             en eski ve en yaygın motiflerinden biridir.",
            "https://images.motiflab.example/elibelinde.jpg",
        ),
        motif(
            "5",
            "Koçboynuzu",
            MotifCategory::Motif,
            "Güç, kahramanlık ve erkekliği simgeleyen boynuz biçimli motif.",
            "Göçebe Türk kültüründe koç, bereket ve kuvvetin işaretiydi; motif keçe, halı ve \
             taş işçiliğinde yaygın olarak kullanıldı.",
            "https://images.motiflab.example/kocboynuzu.jpg",
        ),
    ]
}
