use crate::models::{SoundCategory, SoundTrack};

pub static SOUND_TRACKS: [SoundTrack; 6] = [
    SoundTrack {
        id: "1",
        title: "Som do Útero (2 Horas)",
        category: SoundCategory::Womb,
        video_id: "0e9QuV6yXk",
        duration: "2:00:00",
        color: "bg-red-100",
    },
    SoundTrack {
        id: "2",
        title: "Ruído Branco Puro (Tela Preta)",
        category: SoundCategory::Baby,
        video_id: "nMfPqeZjc2c",
        duration: "2:00:00",
        color: "bg-gray-100",
    },
    SoundTrack {
        id: "3",
        title: "Chuva e Trovões Suaves",
        category: SoundCategory::Nature,
        video_id: "mPZkdNFkNps",
        duration: "2:00:00",
        color: "bg-blue-200",
    },
    SoundTrack {
        id: "4",
        title: "Caixinha de Música (Brahms)",
        category: SoundCategory::Baby,
        video_id: "k6rQhD5211Y",
        duration: "1:00:00",
        color: "bg-yellow-100",
    },
    SoundTrack {
        id: "5",
        title: "Piano Romântico Internacional",
        category: SoundCategory::Mom,
        video_id: "t5Jc15e8Q5c",
        duration: "1:30:00",
        color: "bg-purple-100",
    },
    SoundTrack {
        id: "6",
        title: "Floresta Mágica",
        category: SoundCategory::Nature,
        video_id: "xNN7iTA57jM",
        duration: "2:00:00",
        color: "bg-green-100",
    },
];
