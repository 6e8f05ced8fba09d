//! Static résumé knowledge base.
//!
//! Six fixed chunks, compiled into the binary. They are never mutated or
//! extended at runtime, so every request reads the same global slice.

/// Identifier for one of the fixed résumé chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkId {
    Bio,
    Skills,
    Projects,
    Experience,
    Achievements,
    Contact,
}

impl ChunkId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkId::Bio => "bio",
            ChunkId::Skills => "skills",
            ChunkId::Projects => "projects",
            ChunkId::Experience => "experience",
            ChunkId::Achievements => "achievements",
            ChunkId::Contact => "contact",
        }
    }
}

/// A named, fixed block of résumé text used as a retrieval unit.
#[derive(Debug, Clone, Copy)]
pub struct KnowledgeChunk {
    pub id: ChunkId,
    pub text: &'static str,
}

impl KnowledgeChunk {
    pub fn name(&self) -> &'static str {
        self.id.as_str()
    }
}

const BIO: &str = "Vedant Ganesh Badukale is a B.Tech student in Electronics & Telecommunications (IoT) at IIIT Nagpur (2023-2027) \
    with a CGPA of 7.86. He specializes in Computer Vision, Edge AI, and Backend Engineering. \
    He bridges the gap between software (AI Models) and hardware (Edge Devices).";

const SKILLS: &str = "Languages: Python, C++ (STL), C, SQL, Java, JavaScript. \
    AI/CV: PyTorch, TensorFlow, OpenCV, YOLO (v8), Transformers (ViT), GANs, DeepSORT, ByteTrack. \
    Edge/DevOps: Docker, Git, Linux (Systemd), AWS/GCP, FastAPI, ONNX, Hailo DFC (Quantization), ROS2.";

const PROJECTS: &str = "1. AI Safety Compliance (Jan 2026): Real-time PPE detection (30+ FPS) using YOLOv8 & FastAPI with <100ms latency. \
    2. Full-Body Gender Classification (Dec 2025): IEEE Published research (ICDSINC 2025). Achieved 97.42% accuracy using custom VGG16 on DeepFashion dataset. \
    3. Football Player Analytics (Jun 2025): Multi-Object Tracking (MOT) with 85% MOTA using YOLOv8 + ByteTrack. Reduced ID switching by 60%. \
    4. FixMyRoad (Apr 2025): Automated road damage assessment app (Flask + CV) with 92% accuracy.";

const EXPERIENCE: &str = "R&D Intern at TiHAN-IIT Hyderabad (Apr 2025 - Dec 2025): \
    1. Constructed a precision agriculture model for dense object detection (25 objs/frame), improving mAP by 8.4%. \
    2. Spearheaded Edge AI deployment on Raspberry Pi 5B + Hailo-8 accelerators using Post-Training Quantization (INT8). \
    3. Architected resilient GStreamer pipelines for autonomous video streaming.";

const ACHIEVEMENTS: &str = "1. Winner, MarketWise Hackathon (IIIT Nagpur) - Computer Vision Track (800+ participants). \
    2. Runner Up, Analytica Hackathon - Generative AI/RAG Track. \
    3. 7th Position, e-Yantra Robotics Competition (IIT Bombay). \
    4. Core Member, GDG IIIT Nagpur (AI/ML) - Mentored 200+ students.";

const CONTACT: &str = "Email: vedantbadukale@gmail.com | Phone: +91-8446816634 | \
    GitHub: github.com/Vedant988 | LinkedIn: linkedin.com/in/vedant-badukale-887704283";

static CHUNKS: [KnowledgeChunk; 6] = [
    KnowledgeChunk { id: ChunkId::Bio, text: BIO },
    KnowledgeChunk { id: ChunkId::Skills, text: SKILLS },
    KnowledgeChunk { id: ChunkId::Projects, text: PROJECTS },
    KnowledgeChunk { id: ChunkId::Experience, text: EXPERIENCE },
    KnowledgeChunk { id: ChunkId::Achievements, text: ACHIEVEMENTS },
    KnowledgeChunk { id: ChunkId::Contact, text: CONTACT },
];

/// Every chunk in declaration order.
pub fn all_chunks() -> &'static [KnowledgeChunk] {
    &CHUNKS
}

/// Looks up a chunk by id. Infallible: every `ChunkId` has exactly one entry.
pub fn chunk(id: ChunkId) -> &'static KnowledgeChunk {
    match id {
        ChunkId::Bio => &CHUNKS[0],
        ChunkId::Skills => &CHUNKS[1],
        ChunkId::Projects => &CHUNKS[2],
        ChunkId::Experience => &CHUNKS[3],
        ChunkId::Achievements => &CHUNKS[4],
        ChunkId::Contact => &CHUNKS[5],
    }
}
