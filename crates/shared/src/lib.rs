use serde::{Deserialize, Serialize};

/// Ключ анатомической области (региона) модели
pub type RegionKey = String;

/// Уникальный идентификатор маркера (узла графа, ориентира)
pub type MarkerId = String;

/// Цвет RGBA, компоненты 0–255
pub type Rgba = [u8; 4];

fn default_region_color() -> Rgba {
    [180, 180, 190, 255]
}

/// Вершина модели
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelVertex {
    /// Позиция в пространстве модели (ось Y направлена вверх)
    pub position: [f32; 3],
    /// Предвычисленная внешняя нормаль (единичный вектор)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<[f32; 3]>,
    /// Регион, к которому принадлежит вершина
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<RegionKey>,
}

impl ModelVertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
            normal: None,
            region: None,
        }
    }

    pub fn with_region(x: f32, y: f32, z: f32, region: &str) -> Self {
        Self {
            position: [x, y, z],
            normal: None,
            region: Some(region.to_string()),
        }
    }
}

/// Треугольная грань — три индекса в список вершин модели
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFace {
    /// Индексы вершин (против часовой стрелки снаружи)
    pub indices: [u32; 3],
    /// Явный регион грани; если None — регион первой вершины
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<RegionKey>,
}

impl ModelFace {
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self {
            indices: [a, b, c],
            region: None,
        }
    }
}

/// Метаданные региона: имя для отображения, базовый цвет, состав
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionInfo {
    pub key: RegionKey,
    /// Отображаемое имя (например «Left frontal lobe»)
    pub name: String,
    /// Базовый цвет RGBA до модуляции освещением и активностью
    #[serde(default = "default_region_color")]
    pub color: Rgba,
    /// Индексы вершин-участников; пустой список — вывести из тегов вершин
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vertices: Vec<u32>,
    /// Предвычисленный центроид; если None — среднее позиций участников
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centroid: Option<[f32; 3]>,
}

impl RegionInfo {
    pub fn new(key: &str, name: &str, color: Rgba) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            color,
            vertices: Vec::new(),
            centroid: None,
        }
    }
}

/// Маркер — именованная точка модели (узел молекулярного графа,
/// анатомический ориентир). Интерактивная цель наведения и выбора.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMarker {
    pub id: MarkerId,
    /// Подпись маркера
    pub label: String,
    pub position: [f32; 3],
    /// Регион, с которым связан маркер
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<RegionKey>,
}

/// Ребро между маркерами (связь молекулярного/сетевого графа)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerLink {
    pub from: MarkerId,
    pub to: MarkerId,
}

/// Полное описание модели — контракт с генератором геометрии.
/// Загружается целиком при инициализации; геометрия после загрузки
/// неизменна, меняются только цвета регионов (снаружи, по кадрам).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModelDescription {
    /// Имя модели (отображается в заголовке)
    pub name: String,
    pub vertices: Vec<ModelVertex>,
    pub faces: Vec<ModelFace>,
    pub regions: Vec<RegionInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<ModelMarker>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<MarkerLink>,
}

impl ModelDescription {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Найти метаданные региона по ключу
    pub fn region(&self, key: &str) -> Option<&RegionInfo> {
        self.regions.iter().find(|r| r.key == key)
    }
}
